//! Catalog CRUD commands.

use clap::Args;
use tracing::info;

use crate::confirm::{AlwaysConfirm, Confirm, TerminalConfirm};
use crate::error::{Error, Result};
use crate::model::{
    Language, PLACEHOLDER_COVER, Project, Track, TrackFilter, TrackPatch,
};
use crate::store::{JsonFileStorage, TrackStore};

/// Open the store over the configured database location.
pub(super) fn open_store() -> Result<TrackStore<JsonFileStorage>> {
    let config = crate::config::load();
    let storage = match config.catalog.database_path {
        Some(path) => JsonFileStorage::new(path),
        None => JsonFileStorage::default_location()?,
    };
    Ok(TrackStore::open(storage))
}

/// List tracks matching the given filters.
pub fn cmd_list(
    search: Option<&str>,
    language: Option<Language>,
    project: Option<Project>,
    picks: bool,
) -> Result<()> {
    let store = open_store()?;
    let filter = TrackFilter {
        search: search.unwrap_or_default().to_string(),
        language,
        project,
        only_editors_pick: picks,
    };

    let hits = filter.apply(store.tracks());
    if hits.is_empty() {
        println!("找不到相符的歌曲");
        return Ok(());
    }

    for track in &hits {
        let languages = track
            .languages
            .iter()
            .map(|l| l.label())
            .collect::<Vec<_>>()
            .join("/");
        let pick = if track.is_editors_pick { " ★" } else { "" };
        let missing = track.missing_fields();
        let completeness = if missing.is_empty() {
            "資料完整".to_string()
        } else {
            format!("缺: {}", missing.join(", "))
        };
        println!(
            "{:<16} {:<24} [{}] {} {} ({}){}",
            track.id,
            track.title,
            languages,
            track.isrc,
            track.release_date,
            completeness,
            pick,
        );
    }
    println!("{} tracks", hits.len());
    Ok(())
}

/// Print the full record for one track.
pub fn cmd_show(id: &str) -> Result<()> {
    let store = open_store()?;
    let track = store.find(id).ok_or_else(|| Error::unknown_track(id))?;

    println!("id:            {}", track.id);
    println!("title:         {}", track.title);
    println!("artist:        {}", track.artist);
    println!(
        "version:       {}",
        track.version_label.as_deref().unwrap_or("原版")
    );
    println!("release date:  {}", track.release_date);
    println!(
        "languages:     {}",
        track
            .languages
            .iter()
            .map(|l| l.label())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("project:       {}", track.project);
    println!("editors pick:  {}", track.is_editors_pick);
    println!("isrc:          {}", track.isrc);
    println!("upc:           {}", track.upc);
    println!("spotify id:    {}", track.spotify_id);
    if let Some(v) = &track.youtube_id {
        println!("youtube id:    {v}");
    }
    println!("cover:         {}", track.cover_image);
    if let Some(v) = &track.description {
        println!("description:   {v}");
    }
    if let Some(v) = &track.lyric_video_url {
        println!("lyric video:   {v}");
    }
    if let Some(v) = &track.musixmatch_url {
        println!("musixmatch:    {v}");
    }
    if let Some(v) = &track.youtube_music_url {
        println!("youtube music: {v}");
    }
    if let Some(v) = &track.apple_music_url {
        println!("apple music:   {v}");
    }
    if let Some(lyrics) = &track.lyrics {
        println!("lyrics:\n{lyrics}");
    }
    let missing = track.missing_fields();
    if !missing.is_empty() {
        println!("missing:       {}", missing.join(", "));
    }
    Ok(())
}

/// Arguments for `add`.
#[derive(Debug, Args)]
pub struct AddArgs {
    /// Track title (required)
    #[arg(long)]
    pub title: Option<String>,
    /// ISRC code (required)
    #[arg(long)]
    pub isrc: Option<String>,
    /// Performing artist (defaults to the configured artist)
    #[arg(long)]
    pub artist: Option<String>,
    /// Version marker, e.g. "Acoustic Ver."
    #[arg(long)]
    pub version_label: Option<String>,
    /// Release date YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub date: Option<String>,
    /// Performance language (repeatable; defaults to mandarin)
    #[arg(long = "language")]
    pub languages: Vec<Language>,
    /// Release project
    #[arg(long, default_value = "independent")]
    pub project: Project,
    /// Mark as editors' pick
    #[arg(long)]
    pub pick: bool,
    /// UPC code
    #[arg(long, default_value = "")]
    pub upc: String,
    /// Spotify track id
    #[arg(long, default_value = "")]
    pub spotify_id: String,
    /// YouTube video id
    #[arg(long)]
    pub youtube_id: Option<String>,
    /// Cover art URL (placeholder substituted when omitted)
    #[arg(long)]
    pub cover: Option<String>,
    /// Background story / description
    #[arg(long)]
    pub description: Option<String>,
    /// Full lyrics text
    #[arg(long)]
    pub lyrics: Option<String>,
    /// Lyric video URL
    #[arg(long)]
    pub lyric_video: Option<String>,
    /// Musixmatch page URL
    #[arg(long)]
    pub musixmatch: Option<String>,
    /// YouTube Music link
    #[arg(long)]
    pub youtube_music: Option<String>,
    /// Apple Music link
    #[arg(long)]
    pub apple_music: Option<String>,
}

impl AddArgs {
    /// Validate and build the new track record.
    ///
    /// Title and ISRC are required; everything else falls back to the
    /// same defaults the add form uses.
    pub fn to_track(&self, default_artist: &str) -> Result<Track> {
        let (Some(title), Some(isrc)) = (&self.title, &self.isrc) else {
            return Err(Error::validation("請至少輸入歌名與 ISRC"));
        };
        if title.is_empty() || isrc.is_empty() {
            return Err(Error::validation("請至少輸入歌名與 ISRC"));
        }

        let languages = if self.languages.is_empty() {
            vec![Language::Mandarin]
        } else {
            self.languages.clone()
        };

        Ok(Track {
            id: Track::generate_id(),
            title: title.clone(),
            artist: self
                .artist
                .clone()
                .unwrap_or_else(|| default_artist.to_string()),
            version_label: Some(
                self.version_label
                    .clone()
                    .unwrap_or_else(|| "Original".to_string()),
            ),
            release_date: self
                .date
                .clone()
                .unwrap_or_else(|| chrono::Utc::now().format("%Y-%m-%d").to_string()),
            languages,
            project: self.project,
            is_editors_pick: self.pick,
            isrc: isrc.clone(),
            upc: self.upc.clone(),
            spotify_id: self.spotify_id.clone(),
            youtube_id: self.youtube_id.clone(),
            cover_image: self
                .cover
                .clone()
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| PLACEHOLDER_COVER.to_string()),
            description: self.description.clone(),
            lyrics: self.lyrics.clone(),
            lyric_video_url: self.lyric_video.clone(),
            musixmatch_url: self.musixmatch.clone(),
            youtube_music_url: self.youtube_music.clone(),
            apple_music_url: self.apple_music.clone(),
        })
    }
}

/// Create a new track at the front of the catalog.
pub fn cmd_add(args: &AddArgs) -> Result<()> {
    let config = crate::config::load();
    let track = args.to_track(&config.catalog.default_artist)?;
    let id = track.id.clone();

    let mut store = open_store()?;
    store.add_track(track)?;
    info!("Added track {id}");
    println!("Added track {id}");
    Ok(())
}

/// Arguments for `edit`.
#[derive(Debug, Args)]
pub struct EditArgs {
    /// Track id
    pub id: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub artist: Option<String>,
    #[arg(long)]
    pub version_label: Option<String>,
    #[arg(long)]
    pub date: Option<String>,
    /// Replacement language set (repeatable)
    #[arg(long = "language")]
    pub languages: Vec<Language>,
    #[arg(long)]
    pub project: Option<Project>,
    /// Set or clear the editors' pick flag
    #[arg(long)]
    pub pick: Option<bool>,
    #[arg(long)]
    pub isrc: Option<String>,
    #[arg(long)]
    pub upc: Option<String>,
    #[arg(long)]
    pub spotify_id: Option<String>,
    #[arg(long)]
    pub youtube_id: Option<String>,
    #[arg(long)]
    pub cover: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub lyrics: Option<String>,
    #[arg(long)]
    pub lyric_video: Option<String>,
    #[arg(long)]
    pub musixmatch: Option<String>,
    #[arg(long)]
    pub youtube_music: Option<String>,
    #[arg(long)]
    pub apple_music: Option<String>,
}

impl EditArgs {
    /// The field-level patch these flags describe.
    pub fn to_patch(&self) -> TrackPatch {
        TrackPatch {
            title: self.title.clone(),
            artist: self.artist.clone(),
            version_label: self.version_label.clone(),
            release_date: self.date.clone(),
            languages: (!self.languages.is_empty()).then(|| self.languages.clone()),
            project: self.project,
            is_editors_pick: self.pick,
            isrc: self.isrc.clone(),
            upc: self.upc.clone(),
            spotify_id: self.spotify_id.clone(),
            youtube_id: self.youtube_id.clone(),
            cover_image: self.cover.clone(),
            description: self.description.clone(),
            lyrics: self.lyrics.clone(),
            lyric_video_url: self.lyric_video.clone(),
            musixmatch_url: self.musixmatch.clone(),
            youtube_music_url: self.youtube_music.clone(),
            apple_music_url: self.apple_music.clone(),
        }
    }
}

/// Merge the given fields into an existing track.
pub fn cmd_edit(args: &EditArgs) -> Result<()> {
    let mut store = open_store()?;
    if store.find(&args.id).is_none() {
        return Err(Error::unknown_track(&args.id));
    }

    let patch = args.to_patch();
    if patch.is_empty() {
        println!("Nothing to change for {}", args.id);
        return Ok(());
    }

    store.update_track(&args.id, &patch)?;
    info!("Updated track {}", args.id);
    println!("Updated track {}", args.id);
    Ok(())
}

/// Delete a track, prompting for confirmation unless `yes`.
pub fn cmd_delete(id: &str, yes: bool) -> Result<()> {
    let mut store = open_store()?;
    if store.find(id).is_none() {
        return Err(Error::unknown_track(id));
    }

    let removed = if yes {
        store.delete_track(id, &AlwaysConfirm)?
    } else {
        store.delete_track(id, &TerminalConfirm)?
    };

    if removed {
        info!("Deleted track {id}");
        println!("Deleted track {id}");
    } else {
        println!("已取消");
    }
    Ok(())
}

/// Restore the bundled seed catalog.
pub fn cmd_reset(yes: bool) -> Result<()> {
    let confirm: &dyn Confirm = if yes { &AlwaysConfirm } else { &TerminalConfirm };
    if !confirm.confirm("確定要重設資料庫並還原示範資料嗎？") {
        println!("已取消");
        return Ok(());
    }

    let mut store = open_store()?;
    store.reset_to_seed()?;
    info!("Catalog reset to seed data");
    println!("Catalog reset: {} tracks", store.tracks().len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_add() -> AddArgs {
        AddArgs {
            title: Some("失物招領".to_string()),
            isrc: Some("TW-A01-24-00100".to_string()),
            artist: None,
            version_label: None,
            date: None,
            languages: vec![],
            project: Project::Independent,
            pick: false,
            upc: String::new(),
            spotify_id: String::new(),
            youtube_id: None,
            cover: None,
            description: None,
            lyrics: None,
            lyric_video: None,
            musixmatch: None,
            youtube_music: None,
            apple_music: None,
        }
    }

    #[test]
    fn test_add_requires_title_and_isrc() {
        let mut args = minimal_add();
        args.title = None;
        assert!(matches!(
            args.to_track("Willwi"),
            Err(Error::Validation(_))
        ));

        let mut args = minimal_add();
        args.isrc = Some(String::new());
        assert!(matches!(
            args.to_track("Willwi"),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_add_defaults() {
        let track = minimal_add().to_track("Willwi").unwrap();
        assert!(track.id.starts_with("local_"));
        assert_eq!(track.artist, "Willwi");
        assert_eq!(track.languages, vec![Language::Mandarin]);
        assert_eq!(track.version_label.as_deref(), Some("Original"));
        assert_eq!(track.cover_image, PLACEHOLDER_COVER);
        // Default release date is ISO shaped
        assert_eq!(track.release_date.len(), 10);
    }

    #[test]
    fn test_edit_patch_only_carries_given_flags() {
        let args = EditArgs {
            id: "rec1".to_string(),
            title: Some("New".to_string()),
            artist: None,
            version_label: None,
            date: None,
            languages: vec![],
            project: None,
            pick: None,
            isrc: None,
            upc: None,
            spotify_id: None,
            youtube_id: None,
            cover: None,
            description: None,
            lyrics: None,
            lyric_video: None,
            musixmatch: None,
            youtube_music: None,
            apple_music: None,
        };
        let patch = args.to_patch();
        assert_eq!(patch.title.as_deref(), Some("New"));
        assert!(patch.languages.is_none());
        assert!(patch.isrc.is_none());
        assert!(!patch.is_empty());
    }
}
