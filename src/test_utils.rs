//! Test utilities and fixtures for catalog-minder tests.
//!
//! Provides a sample-track factory, an in-memory storage backend and a
//! pre-seeded store to reduce boilerplate in tests.
//!
//! # Example
//!
//! ```ignore
//! use crate::test_utils::{sample_track, seeded_store};
//!
//! #[test]
//! fn test_something() {
//!     let mut store = seeded_store();
//!     store.add_track(sample_track("local_1")).unwrap();
//! }
//! ```

use std::cell::{Cell, RefCell};

use crate::model::{Language, Project, Track};
use crate::store::{StorageBackend, StoreError, TrackStore};

/// Creates a Track with sensible defaults and the given id.
///
/// Customize with struct update syntax:
///
/// ```ignore
/// let track = Track { title: "X".to_string(), ..sample_track("local_1") };
/// ```
pub fn sample_track(id: &str) -> Track {
    Track {
        id: id.to_string(),
        title: "測試歌曲".to_string(),
        artist: "Willwi".to_string(),
        version_label: None,
        release_date: "2024-06-01".to_string(),
        languages: vec![Language::Mandarin],
        project: Project::Independent,
        is_editors_pick: false,
        isrc: "TW-A01-24-99999".to_string(),
        upc: "198000000099".to_string(),
        spotify_id: "0sample00000".to_string(),
        youtube_id: None,
        cover_image: "https://example.com/cover.jpg".to_string(),
        description: Some("測試用的歌曲描述。".to_string()),
        lyrics: None,
        lyric_video_url: None,
        musixmatch_url: None,
        youtube_music_url: None,
        apple_music_url: None,
    }
}

/// In-memory [`StorageBackend`] with scriptable failure modes.
pub struct MemoryStorage {
    slot: RefCell<Option<Vec<Track>>>,
    fail_load: bool,
    fail_save: bool,
    saves: Cell<usize>,
}

impl MemoryStorage {
    /// Empty slot, all operations succeed.
    pub fn empty() -> Self {
        Self {
            slot: RefCell::new(None),
            fail_load: false,
            fail_save: false,
            saves: Cell::new(0),
        }
    }

    /// Slot pre-populated with `tracks`.
    pub fn with_tracks(tracks: Vec<Track>) -> Self {
        let storage = Self::empty();
        *storage.slot.borrow_mut() = Some(tracks);
        storage
    }

    /// Every load fails (simulates an unreadable slot).
    pub fn failing_load() -> Self {
        Self {
            fail_load: true,
            ..Self::empty()
        }
    }

    /// Every save fails (simulates a full disk).
    pub fn failing_save() -> Self {
        Self {
            fail_save: true,
            ..Self::empty()
        }
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl StorageBackend for MemoryStorage {
    fn load(&self) -> Result<Option<Vec<Track>>, StoreError> {
        if self.fail_load {
            return Err(StoreError::Read {
                path: "<memory>".into(),
                source: std::io::Error::other("scripted load failure"),
            });
        }
        Ok(self.slot.borrow().clone())
    }

    fn save(&self, tracks: &[Track]) -> Result<(), StoreError> {
        if self.fail_save {
            return Err(StoreError::Write {
                path: "<memory>".into(),
                source: std::io::Error::other("scripted save failure"),
            });
        }
        *self.slot.borrow_mut() = Some(tracks.to_vec());
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}

/// A store freshly opened over an empty in-memory slot, i.e. holding
/// the 5-track seed collection.
pub fn seeded_store() -> TrackStore<MemoryStorage> {
    TrackStore::open(MemoryStorage::empty())
}
