//! Bundled seed catalog.
//!
//! Used when the persistence slot is empty or unreadable, so a fresh
//! install starts with something to browse instead of a blank database.

use crate::model::{Language, Project, Track};

fn track(id: &str) -> Track {
    Track {
        id: id.to_string(),
        title: String::new(),
        artist: "Willwi".to_string(),
        version_label: None,
        release_date: String::new(),
        languages: Vec::new(),
        project: Project::Independent,
        is_editors_pick: false,
        isrc: String::new(),
        upc: String::new(),
        spotify_id: String::new(),
        youtube_id: None,
        cover_image: String::new(),
        description: None,
        lyrics: None,
        lyric_video_url: None,
        musixmatch_url: None,
        youtube_music_url: None,
        apple_music_url: None,
    }
}

/// The five demo tracks a fresh catalog is seeded with.
pub fn seed_tracks() -> Vec<Track> {
    vec![
        Track {
            title: "再愛一次 (Love Again)".to_string(),
            release_date: "2023-11-15".to_string(),
            languages: vec![Language::Mandarin, Language::English],
            is_editors_pick: true,
            isrc: "TW-A01-23-00001".to_string(),
            upc: "198000000001".to_string(),
            spotify_id: "4iV5W9uYEdYUVa79Axb7Rh".to_string(),
            youtube_id: Some("dQw4w9WgXcQ".to_string()),
            cover_image: "https://picsum.photos/400/400?random=1".to_string(),
            description: Some("探討重燃舊愛複雜情感的靈魂抒情曲。曾獲 Spotify 編輯推薦。".to_string()),
            lyric_video_url: Some("https://www.youtube.com/embed/dQw4w9WgXcQ".to_string()),
            musixmatch_url: Some("https://www.musixmatch.com/lyrics/Willwi/Love-Again".to_string()),
            youtube_music_url: Some("https://music.youtube.com/watch?v=dQw4w9WgXcQ".to_string()),
            ..track("rec1")
        },
        Track {
            title: "Noodle Dreams".to_string(),
            release_date: "2024-01-20".to_string(),
            languages: vec![Language::Japanese, Language::Taiwanese],
            project: Project::InstantNoodle,
            isrc: "TW-A01-24-00022".to_string(),
            upc: "198000000002".to_string(),
            spotify_id: "5n88800000002".to_string(),
            youtube_id: Some("xyz123".to_string()),
            cover_image: "https://picsum.photos/400/400?random=2".to_string(),
            description: Some("泡麵聲學院計畫下的實驗電子音樂作品，融合了生活中的聲音。".to_string()),
            ..track("rec2")
        },
        Track {
            title: "Seoul Night".to_string(),
            release_date: "2024-02-14".to_string(),
            languages: vec![Language::Korean, Language::English],
            isrc: "TW-A01-24-00033".to_string(),
            upc: "198000000003".to_string(),
            spotify_id: "6x99900000003".to_string(),
            cover_image: "https://picsum.photos/400/400?random=3".to_string(),
            description: Some("針對國際市場打造的 City Pop 風格單曲。".to_string()),
            ..track("rec3")
        },
        Track {
            title: "Formosa Rain".to_string(),
            release_date: "2023-08-01".to_string(),
            languages: vec![Language::Taiwanese],
            project: Project::InstantNoodle,
            is_editors_pick: true,
            isrc: "TW-A01-23-00015".to_string(),
            upc: "198000000004".to_string(),
            spotify_id: "7y77700000004".to_string(),
            cover_image: "https://picsum.photos/400/400?random=4".to_string(),
            description: Some("傳統樂器與現代 Lo-Fi 節拍的碰撞，營造出雨夜的氛圍。".to_string()),
            ..track("rec4")
        },
        Track {
            title: "Global Citizen".to_string(),
            release_date: "2024-03-01".to_string(),
            languages: vec![Language::English, Language::Mandarin, Language::Japanese],
            isrc: "TW-A01-24-00055".to_string(),
            upc: "198000000005".to_string(),
            spotify_id: "8z88800000005".to_string(),
            cover_image: "https://picsum.photos/400/400?random=5".to_string(),
            description: Some("數位遊牧世代的國歌，跨越語言與國界的連結。".to_string()),
            ..track("rec5")
        },
    ]
}
