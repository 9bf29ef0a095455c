//! Core data model for the discography catalog.
//!
//! Defines the primary entity [`Track`] along with its two closed
//! classification enums, [`Language`] and [`Project`], and the
//! [`TrackPatch`] type used for field-level partial updates.
//!
//! # Wire format
//!
//! Tracks are persisted as camelCase JSON, which is the on-disk database
//! format. Classification enums serialize as their Traditional Chinese
//! display labels because that is what the stored data uses. Optional
//! fields are omitted when absent and tolerated when missing on read,
//! so new fields can be added without a schema version.

mod filter;

pub use filter::TrackFilter;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Languages a track can be performed in.
///
/// Serialized as the Chinese labels used throughout the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum Language {
    #[serde(rename = "華語")]
    Mandarin,
    #[serde(rename = "台語")]
    Taiwanese,
    #[serde(rename = "日語")]
    Japanese,
    #[serde(rename = "韓語")]
    Korean,
    #[serde(rename = "英語")]
    English,
}

impl Language {
    /// Display label (matches the serialized form).
    pub fn label(&self) -> &'static str {
        match self {
            Language::Mandarin => "華語",
            Language::Taiwanese => "台語",
            Language::Japanese => "日語",
            Language::Korean => "韓語",
            Language::English => "英語",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Release projects the catalog is split into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum Project {
    /// 獨立發行 - self-released singles
    #[serde(rename = "獨立發行")]
    Independent,
    /// 泡麵聲學院 - the experimental side project
    #[serde(rename = "泡麵聲學院")]
    InstantNoodle,
}

impl Project {
    /// Display label (matches the serialized form).
    pub fn label(&self) -> &'static str {
        match self {
            Project::Independent => "獨立發行",
            Project::InstantNoodle => "泡麵聲學院",
        }
    }
}

impl std::fmt::Display for Project {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One discography entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Opaque unique id, assigned at creation, never reassigned
    pub id: String,
    /// Track title
    pub title: String,
    /// Performing artist
    pub artist: String,
    /// Version marker, e.g. "Acoustic Ver." (absent means the original cut)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_label: Option<String>,
    /// Release date, ISO `YYYY-MM-DD`
    pub release_date: String,
    /// Performance languages, order-preserving for display
    pub languages: Vec<Language>,
    /// Which release project the track belongs to
    pub project: Project,
    /// Editorial highlight flag
    pub is_editors_pick: bool,
    /// International Standard Recording Code (free text, not validated)
    pub isrc: String,
    /// Universal Product Code (free text, not validated)
    pub upc: String,
    /// Spotify track id
    pub spotify_id: String,
    /// YouTube video id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube_id: Option<String>,
    /// Cover art URL
    pub cover_image: String,
    /// Background story / description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Full lyrics text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lyrics: Option<String>,
    /// Lyric video URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lyric_video_url: Option<String>,
    /// Per-track Musixmatch page override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub musixmatch_url: Option<String>,
    /// Per-track YouTube Music link override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube_music_url: Option<String>,
    /// Per-track Apple Music link override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apple_music_url: Option<String>,
}

/// Cover URL substituted when a new track is created without one.
pub const PLACEHOLDER_COVER: &str = "https://picsum.photos/400/400?grayscale";

impl Track {
    /// Generate a fresh record id from the creation timestamp.
    ///
    /// Ids look like `local_1717430400000`. Millisecond resolution is
    /// plenty for a single operator typing into a form.
    pub fn generate_id() -> String {
        format!("local_{}", chrono::Utc::now().timestamp_millis())
    }
}

/// A field-level partial update for a [`Track`].
///
/// Every field is optional; `apply` overwrites exactly the fields that
/// are present and leaves the rest untouched. There is no way to clear
/// an optional field back to absent - setting it to an empty string is
/// what the edit form does, and what we do too.
#[derive(Debug, Clone, Default)]
pub struct TrackPatch {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub version_label: Option<String>,
    pub release_date: Option<String>,
    pub languages: Option<Vec<Language>>,
    pub project: Option<Project>,
    pub is_editors_pick: Option<bool>,
    pub isrc: Option<String>,
    pub upc: Option<String>,
    pub spotify_id: Option<String>,
    pub youtube_id: Option<String>,
    pub cover_image: Option<String>,
    pub description: Option<String>,
    pub lyrics: Option<String>,
    pub lyric_video_url: Option<String>,
    pub musixmatch_url: Option<String>,
    pub youtube_music_url: Option<String>,
    pub apple_music_url: Option<String>,
}

impl TrackPatch {
    /// True when no field is set (applying would change nothing).
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.artist.is_none()
            && self.version_label.is_none()
            && self.release_date.is_none()
            && self.languages.is_none()
            && self.project.is_none()
            && self.is_editors_pick.is_none()
            && self.isrc.is_none()
            && self.upc.is_none()
            && self.spotify_id.is_none()
            && self.youtube_id.is_none()
            && self.cover_image.is_none()
            && self.description.is_none()
            && self.lyrics.is_none()
            && self.lyric_video_url.is_none()
            && self.musixmatch_url.is_none()
            && self.youtube_music_url.is_none()
            && self.apple_music_url.is_none()
    }

    /// Merge this patch over `track`, overwriting only the set fields.
    pub fn apply(&self, track: &mut Track) {
        if let Some(v) = &self.title {
            track.title = v.clone();
        }
        if let Some(v) = &self.artist {
            track.artist = v.clone();
        }
        if let Some(v) = &self.version_label {
            track.version_label = Some(v.clone());
        }
        if let Some(v) = &self.release_date {
            track.release_date = v.clone();
        }
        if let Some(v) = &self.languages {
            track.languages = v.clone();
        }
        if let Some(v) = self.project {
            track.project = v;
        }
        if let Some(v) = self.is_editors_pick {
            track.is_editors_pick = v;
        }
        if let Some(v) = &self.isrc {
            track.isrc = v.clone();
        }
        if let Some(v) = &self.upc {
            track.upc = v.clone();
        }
        if let Some(v) = &self.spotify_id {
            track.spotify_id = v.clone();
        }
        if let Some(v) = &self.youtube_id {
            track.youtube_id = Some(v.clone());
        }
        if let Some(v) = &self.cover_image {
            track.cover_image = v.clone();
        }
        if let Some(v) = &self.description {
            track.description = Some(v.clone());
        }
        if let Some(v) = &self.lyrics {
            track.lyrics = Some(v.clone());
        }
        if let Some(v) = &self.lyric_video_url {
            track.lyric_video_url = Some(v.clone());
        }
        if let Some(v) = &self.musixmatch_url {
            track.musixmatch_url = Some(v.clone());
        }
        if let Some(v) = &self.youtube_music_url {
            track.youtube_music_url = Some(v.clone());
        }
        if let Some(v) = &self.apple_music_url {
            track.apple_music_url = Some(v.clone());
        }
    }

    /// Build a patch that sets every field of `track`.
    ///
    /// Used by the shell's edit mode, which keeps a full draft copy and
    /// merges the whole thing back on save.
    pub fn from_track(track: &Track) -> Self {
        Self {
            title: Some(track.title.clone()),
            artist: Some(track.artist.clone()),
            version_label: track.version_label.clone(),
            release_date: Some(track.release_date.clone()),
            languages: Some(track.languages.clone()),
            project: Some(track.project),
            is_editors_pick: Some(track.is_editors_pick),
            isrc: Some(track.isrc.clone()),
            upc: Some(track.upc.clone()),
            spotify_id: Some(track.spotify_id.clone()),
            youtube_id: track.youtube_id.clone(),
            cover_image: Some(track.cover_image.clone()),
            description: track.description.clone(),
            lyrics: track.lyrics.clone(),
            lyric_video_url: track.lyric_video_url.clone(),
            musixmatch_url: track.musixmatch_url.clone(),
            youtube_music_url: track.youtube_music_url.clone(),
            apple_music_url: track.apple_music_url.clone(),
        }
    }
}
