//! Interactive browse shell.
//!
//! Launched when no subcommand is given. Pages are addressed by path
//! strings, mirroring the app's route table:
//!
//! - `/`            home overview
//! - `/database`    list view with local filters
//! - `/track/<id>`  detail view with an edit mode
//! - `/add`         create form
//!
//! The detail and add pages keep a transient draft buffer; editing it
//! arms the navigation guard, so `open`, `back` and `quit` all run
//! through the unsaved-changes confirmation before a dirty buffer is
//! dropped. Only `save` merges a draft back into the store.

use std::io::{BufRead, Write};

use clap::ValueEnum;
use tracing::debug;

use crate::confirm::{Confirm, TerminalConfirm};
use crate::guard::{Evaluation, NavigationGuard};
use crate::insight;
use crate::model::{Language, PLACEHOLDER_COVER, Project, Track, TrackFilter, TrackPatch};
use crate::store::{JsonFileStorage, StorageBackend, TrackStore};

/// Entry point used by `main` when no subcommand was given.
pub fn run() -> anyhow::Result<()> {
    let config = crate::config::load();
    let storage = match config.catalog.database_path.clone() {
        Some(path) => JsonFileStorage::new(path),
        None => JsonFileStorage::default_location()?,
    };
    let store = TrackStore::open(storage);

    let mut shell = Shell::new(store, TerminalConfirm, &config.catalog.default_artist);
    shell.api_key = config.credentials.gemini_api_key.clone();
    shell.render();

    let stdin = std::io::stdin();
    let mut line = String::new();
    loop {
        print!("catalog:{}> ", shell.location());
        std::io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            // EOF: nothing left to confirm with, leave like a closed tab
            println!();
            break;
        }
        if shell.handle_line(line.trim()) == Outcome::Quit {
            break;
        }
    }
    Ok(())
}

/// What the caller should do after a handled line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Quit,
}

/// A page the shell can be on.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Page {
    Home,
    Database,
    TrackDetail(String),
    Add,
}

fn parse_page(path: &str) -> Option<Page> {
    let path = path.trim().trim_end_matches('/');
    match path {
        "" | "/" => Some(Page::Home),
        "/database" => Some(Page::Database),
        "/add" => Some(Page::Add),
        _ => path
            .strip_prefix("/track/")
            .filter(|id| !id.is_empty())
            .map(|id| Page::TrackDetail(id.to_string())),
    }
}

/// Transient edit buffer for the add form and the detail edit mode.
#[derive(Debug, Clone)]
struct Draft {
    track: Track,
    /// Created by the add form (true) or copied from a record (false)
    is_new: bool,
    dirty: bool,
}

/// The interactive session.
///
/// Generic over storage and confirmation so tests can drive it with an
/// in-memory store and scripted answers.
pub struct Shell<S: StorageBackend, C: Confirm> {
    store: TrackStore<S>,
    confirm: C,
    guard: NavigationGuard,
    location: String,
    history: Vec<String>,
    filter: TrackFilter,
    draft: Option<Draft>,
    default_artist: String,
    api_key: Option<String>,
}

impl<S: StorageBackend, C: Confirm> Shell<S, C> {
    pub fn new(store: TrackStore<S>, confirm: C, default_artist: &str) -> Self {
        Self {
            store,
            confirm,
            guard: NavigationGuard::default(),
            location: "/".to_string(),
            history: Vec::new(),
            filter: TrackFilter::default(),
            draft: None,
            default_artist: default_artist.to_string(),
            api_key: None,
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    fn is_dirty(&self) -> bool {
        self.draft.as_ref().is_some_and(|d| d.dirty)
    }

    /// Handle one input line; rendering goes straight to stdout.
    pub fn handle_line(&mut self, line: &str) -> Outcome {
        let mut parts = line.splitn(2, char::is_whitespace);
        let command = parts.next().unwrap_or_default();
        let rest = parts.next().unwrap_or_default().trim();

        match command {
            "" => {}
            "help" | "?" => self.print_help(),
            "open" => self.navigate(rest),
            "back" => self.go_back(),
            "list" | "ls" => self.render(),
            "search" => {
                self.filter.search = rest.to_string();
                self.render();
            }
            "lang" => self.set_language_filter(rest),
            "project" => self.set_project_filter(rest),
            "picks" => {
                self.filter.only_editors_pick = rest == "on";
                self.render();
            }
            "edit" => self.enter_edit_mode(),
            "set" => self.set_field(rest),
            "save" => self.save_draft(),
            "discard" => {
                if self.draft.take().is_some() {
                    println!("已捨棄變更");
                }
                self.sync_page_draft();
            }
            "delete" => self.delete_current(),
            "insight" => self.insight_current(),
            "quit" | "exit" => {
                // Process-exit channel of the guard
                if let Some(message) = self.guard.exit_prompt(self.is_dirty())
                    && !self.confirm.confirm(message)
                {
                    return Outcome::Continue;
                }
                return Outcome::Quit;
            }
            other => println!("Unknown command '{other}' (try 'help')"),
        }
        Outcome::Continue
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// In-app transition through the guard (channel 1).
    fn navigate(&mut self, path: &str) {
        if path.is_empty() {
            println!("Usage: open </ | /database | /track/<id> | /add>");
            return;
        }
        let Some(page) = parse_page(path) else {
            println!("No such page: {path}");
            return;
        };
        if let Page::TrackDetail(id) = &page
            && self.store.find(id).is_none()
        {
            println!("No track with id '{id}'");
            return;
        }

        match self.guard.evaluate(self.is_dirty(), &self.location, path) {
            Evaluation::Allowed => self.apply_location(path),
            Evaluation::Blocked => {
                debug!("Navigation to {path} blocked by unsaved changes");
                if let Some(destination) = self.guard.resolve(&self.confirm) {
                    self.apply_location(&destination);
                }
                // Declined: stay put, draft intact
            }
        }
    }

    fn apply_location(&mut self, path: &str) {
        // Re-opening the page we are already on keeps any draft alive
        if self.current_page() == parse_page(path) {
            self.render();
            return;
        }
        self.history
            .push(std::mem::replace(&mut self.location, path.to_string()));
        self.draft = None;
        self.sync_page_draft();
        self.render();
    }

    fn go_back(&mut self) {
        match self.history.last().cloned() {
            Some(previous) => {
                let at = self.location.clone();
                self.navigate(&previous);
                // Only pop when the guard let us through. Dropping both
                // the destination re-pushed by apply_location and the
                // entry we returned to keeps walking further back.
                if self.location != at {
                    self.history.pop();
                    self.history.pop();
                }
            }
            None => println!("No page to go back to"),
        }
    }

    /// The add page always carries a fresh form buffer.
    fn sync_page_draft(&mut self) {
        if self.current_page() == Some(Page::Add) && self.draft.is_none() {
            self.draft = Some(Draft {
                track: self.blank_track(),
                is_new: true,
                dirty: false,
            });
        }
    }

    fn current_page(&self) -> Option<Page> {
        parse_page(&self.location)
    }

    fn blank_track(&self) -> Track {
        Track {
            id: String::new(),
            title: String::new(),
            artist: self.default_artist.clone(),
            version_label: Some("Original".to_string()),
            release_date: chrono::Utc::now().format("%Y-%m-%d").to_string(),
            languages: vec![Language::Mandarin],
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

    // ------------------------------------------------------------------
    // Filters
    // ------------------------------------------------------------------

    fn set_language_filter(&mut self, value: &str) {
        if value == "all" || value.is_empty() {
            self.filter.language = None;
        } else {
            match Language::from_str(value, true) {
                Ok(lang) => self.filter.language = Some(lang),
                Err(_) => {
                    println!("Unknown language '{value}'");
                    return;
                }
            }
        }
        self.render();
    }

    fn set_project_filter(&mut self, value: &str) {
        if value == "all" || value.is_empty() {
            self.filter.project = None;
        } else {
            match Project::from_str(value, true) {
                Ok(project) => self.filter.project = Some(project),
                Err(_) => {
                    println!("Unknown project '{value}'");
                    return;
                }
            }
        }
        self.render();
    }

    // ------------------------------------------------------------------
    // Draft editing
    // ------------------------------------------------------------------

    fn enter_edit_mode(&mut self) {
        let Some(Page::TrackDetail(id)) = self.current_page() else {
            println!("'edit' only works on a /track/<id> page");
            return;
        };
        if self.draft.is_some() {
            println!("Already editing");
            return;
        }
        let track = self.store.find(&id).cloned();
        match track {
            Some(track) => {
                self.draft = Some(Draft {
                    track,
                    is_new: false,
                    dirty: false,
                });
                println!("Editing {id} - 'set <field> <value>', then 'save' or 'discard'");
            }
            None => println!("No track with id '{id}'"),
        }
    }

    fn set_field(&mut self, rest: &str) {
        let Some(draft) = self.draft.as_mut() else {
            println!("Nothing to edit here ('edit' on a track page, or 'open /add')");
            return;
        };

        let mut parts = rest.splitn(2, char::is_whitespace);
        let field = parts.next().unwrap_or_default();
        let value = parts.next().unwrap_or_default().trim();
        let track = &mut draft.track;

        match field {
            "title" => track.title = value.to_string(),
            "artist" => track.artist = value.to_string(),
            "version" => track.version_label = Some(value.to_string()),
            "date" => track.release_date = value.to_string(),
            "languages" => {
                let mut languages = Vec::new();
                for token in value.split(',').map(str::trim).filter(|t| !t.is_empty()) {
                    match Language::from_str(token, true) {
                        Ok(lang) => languages.push(lang),
                        Err(_) => {
                            println!("Unknown language '{token}'");
                            return;
                        }
                    }
                }
                if languages.is_empty() {
                    println!("languages needs at least one value");
                    return;
                }
                track.languages = languages;
            }
            "project" => match Project::from_str(value, true) {
                Ok(project) => track.project = project,
                Err(_) => {
                    println!("Unknown project '{value}'");
                    return;
                }
            },
            "pick" => track.is_editors_pick = value == "on" || value == "true",
            "isrc" => track.isrc = value.to_string(),
            "upc" => track.upc = value.to_string(),
            "spotify" => track.spotify_id = value.to_string(),
            "youtube" => track.youtube_id = Some(value.to_string()),
            "cover" => track.cover_image = value.to_string(),
            "description" => track.description = Some(value.to_string()),
            "lyrics" => track.lyrics = Some(value.to_string()),
            "lyric-video" => track.lyric_video_url = Some(value.to_string()),
            "musixmatch" => track.musixmatch_url = Some(value.to_string()),
            "youtube-music" => track.youtube_music_url = Some(value.to_string()),
            "apple-music" => track.apple_music_url = Some(value.to_string()),
            other => {
                println!("Unknown field '{other}'");
                return;
            }
        }
        draft.dirty = true;
    }

    fn save_draft(&mut self) {
        let Some(draft) = self.draft.clone() else {
            println!("Nothing to save");
            return;
        };

        if draft.is_new {
            // Same validation the add form applies
            if draft.track.title.is_empty() || draft.track.isrc.is_empty() {
                println!("請至少輸入歌名與 ISRC");
                return;
            }
            let mut track = draft.track;
            track.id = Track::generate_id();
            if track.cover_image.is_empty() {
                track.cover_image = PLACEHOLDER_COVER.to_string();
            }
            let id = track.id.clone();
            if let Err(e) = self.store.add_track(track) {
                println!("Warning: saved in memory only ({e})");
            }
            println!("Added track {id}");
            // Buffer saved, guard disarmed; redirect to the list view
            self.draft = None;
            self.navigate("/database");
        } else {
            let id = draft.track.id.clone();
            let patch = TrackPatch::from_track(&draft.track);
            if let Err(e) = self.store.update_track(&id, &patch) {
                println!("Warning: saved in memory only ({e})");
            }
            println!("Updated track {id}");
            self.draft = None;
            self.render();
        }
    }

    fn delete_current(&mut self) {
        let Some(Page::TrackDetail(id)) = self.current_page() else {
            println!("'delete' only works on a /track/<id> page");
            return;
        };
        match self.store.delete_track(&id, &self.confirm) {
            Ok(true) => {
                println!("Deleted track {id}");
                self.draft = None;
                self.navigate("/database");
            }
            Ok(false) => println!("已取消"),
            Err(e) => {
                // The record is already gone from memory; leave the
                // dangling detail page like a persisted delete would
                println!("Warning: deleted in memory only ({e})");
                self.draft = None;
                self.navigate("/database");
            }
        }
    }

    fn insight_current(&mut self) {
        let Some(Page::TrackDetail(id)) = self.current_page() else {
            println!("'insight' only works on a /track/<id> page");
            return;
        };
        let Some(track) = self.store.find(&id).cloned() else {
            println!("No track with id '{id}'");
            return;
        };
        let Some(key) = self.api_key.clone().filter(|k| !k.is_empty()) else {
            println!("{}", insight::KEY_MISSING);
            return;
        };

        // Synchronous from the shell's point of view, so a second
        // request cannot start while one is pending.
        let text = match tokio::runtime::Runtime::new() {
            Ok(rt) => {
                let client = insight::GeminiClient::new(key);
                rt.block_on(insight::song_insight(&client, &track))
            }
            Err(e) => {
                tracing::error!("Failed to start runtime for insight: {e}");
                insight::UNAVAILABLE.to_string()
            }
        };
        println!("{text}");
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    fn render(&self) {
        match self.current_page() {
            Some(Page::Home) | None => {
                println!("Willwi 音樂作品資料庫 - {} tracks", self.store.tracks().len());
                println!("Pages: /database  /add  /track/<id>   (open <path>)");
            }
            Some(Page::Database) => self.render_database(),
            Some(Page::TrackDetail(id)) => self.render_track(&id),
            Some(Page::Add) => {
                println!("新增歌曲資料 - 'set <field> <value>', then 'save'");
                if let Some(draft) = &self.draft {
                    println!(
                        "  title: {:<24} isrc: {}",
                        draft.track.title, draft.track.isrc
                    );
                }
            }
        }
    }

    fn render_database(&self) {
        let hits = self.filter.apply(self.store.tracks());
        if !self.filter.is_unrestricted() {
            println!("(filtered view - 'search', 'lang all', 'project all', 'picks off' to widen)");
        }
        if hits.is_empty() {
            println!("找不到相符的歌曲");
            return;
        }
        for track in &hits {
            let pick = if track.is_editors_pick { " ★" } else { "" };
            let missing = track.missing_fields();
            let completeness = if missing.is_empty() {
                "資料完整".to_string()
            } else {
                format!("缺: {}", missing.join(", "))
            };
            println!(
                "{:<16} {:<24} {} ({}){}",
                track.id, track.title, track.isrc, completeness, pick
            );
        }
    }

    fn render_track(&self, id: &str) {
        // Prefer the draft so edits show up before save
        let editing = self.draft.is_some();
        let track = match self.draft.as_ref().map(|d| &d.track) {
            Some(track) => track,
            None => match self.store.find(id) {
                Some(track) => track,
                None => {
                    println!("No track with id '{id}'");
                    return;
                }
            },
        };
        let languages = track
            .languages
            .iter()
            .map(|l| l.label())
            .collect::<Vec<_>>()
            .join(", ");
        println!(
            "{} {} ({})",
            track.title,
            track.version_label.as_deref().unwrap_or("原版"),
            track.release_date
        );
        println!("  {} | {} | ISRC {}", languages, track.project, track.isrc);
        if let Some(description) = &track.description {
            println!("  {description}");
        }
        if editing {
            println!("  [editing - 'save' or 'discard']");
        }
    }

    fn print_help(&self) {
        println!("open <path>      go to /, /database, /track/<id> or /add");
        println!("back             return to the previous page");
        println!("list             re-render the current page");
        println!("search <text>    filter by title/version/ISRC/UPC");
        println!("lang <l|all>     filter by language");
        println!("project <p|all>  filter by project");
        println!("picks on|off     editors' picks only");
        println!("edit             edit the current track");
        println!("set <f> <v>      change a draft field");
        println!("save / discard   keep or drop the draft");
        println!("delete           delete the current track");
        println!("insight          AI commentary for the current track");
        println!("quit             leave the shell");
    }
}
