//! The track store: single source of truth for the catalog.
//!
//! Owns the in-memory track collection and mirrors every mutation to a
//! persistence slot behind the [`StorageBackend`] trait, so the backend
//! (JSON file here, anything else later) can be swapped without touching
//! mutation logic.
//!
//! # Persistence rule
//!
//! The whole collection is rewritten after every mutation, but only once
//! the initial load has completed - otherwise a crash during startup
//! could clobber real data with the empty pre-load collection. Writes
//! are O(collection size) per mutation, which is fine for a catalog a
//! single operator maintains by hand.
//!
//! # Failure semantics
//!
//! A read or parse failure on load degrades to the bundled seed
//! collection (logged, never surfaced as an error). A write failure is
//! handled optimistically: the in-memory mutation stands, the error is
//! logged and returned for the caller to display.

pub mod json_file;
pub mod seed;

pub use json_file::JsonFileStorage;

use std::path::PathBuf;

use tracing::{info, warn};

use crate::confirm::Confirm;
use crate::model::{Track, TrackPatch};

/// Warning shown before a track is deleted.
pub const DELETE_WARNING: &str = "確定要刪除這首歌曲嗎？此動作無法復原。";

/// Storage errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to read catalog from {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to write catalog to {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Could not determine data directory")]
    NoDataDir,
}

/// Where the collection is persisted.
///
/// `load` distinguishes "slot is empty" (`Ok(None)`) from a read or
/// parse failure; the store treats the latter like the former but logs
/// it first.
pub trait StorageBackend {
    /// Read the persisted collection, or `None` if the slot is empty.
    fn load(&self) -> Result<Option<Vec<Track>>, StoreError>;

    /// Overwrite the slot with the full collection.
    fn save(&self, tracks: &[Track]) -> Result<(), StoreError>;
}

/// Authoritative track collection with a persisted mirror.
///
/// Collection order is insertion order, except new tracks are prepended
/// (most recent first). No other component holds a writable copy;
/// consumers keep transient edit buffers and merge them back through
/// [`TrackStore::update_track`].
pub struct TrackStore<S: StorageBackend> {
    tracks: Vec<Track>,
    is_loading: bool,
    backend: S,
}

impl<S: StorageBackend> TrackStore<S> {
    /// Create an empty store; call [`TrackStore::load`] before use.
    pub fn new(backend: S) -> Self {
        Self {
            tracks: Vec::new(),
            is_loading: true,
            backend,
        }
    }

    /// Create a store and run the initial load.
    pub fn open(backend: S) -> Self {
        let mut store = Self::new(backend);
        store.load();
        store
    }

    /// Initial load: persisted slot if present and parseable, else the
    /// seed collection (which is persisted immediately so later loads
    /// are stable).
    ///
    /// Runs once per process; calling it again re-reads the slot.
    pub fn load(&mut self) {
        match self.backend.load() {
            Ok(Some(tracks)) => {
                info!("Loaded {} tracks from storage", tracks.len());
                self.tracks = tracks;
            }
            Ok(None) => {
                info!("Storage slot empty, seeding demo catalog");
                self.seed_and_persist();
            }
            Err(e) => {
                // Diagnostic only; an unreadable slot is treated as empty
                warn!("Failed to load catalog ({e}), falling back to seed data");
                self.seed_and_persist();
            }
        }
        self.is_loading = false;
    }

    fn seed_and_persist(&mut self) {
        self.tracks = seed::seed_tracks();
        if let Err(e) = self.backend.save(&self.tracks) {
            tracing::error!("Failed to persist seed catalog: {e}");
        }
    }

    /// True until the initial load completes.
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// The full collection; callers derive filtered views locally.
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Look up a track by id (first match wins on duplicate ids).
    pub fn find(&self, id: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == id)
    }

    /// Prepend a new track.
    ///
    /// No uniqueness check: callers supply a fresh id (the add flow
    /// generates one from the creation timestamp). A duplicate id is
    /// silently allowed; lookups resolve to the first match.
    pub fn add_track(&mut self, track: Track) -> Result<(), StoreError> {
        self.tracks.insert(0, track);
        self.persist()
    }

    /// Merge `patch` over the track matching `id`.
    ///
    /// Silent no-op when no track matches (nothing is persisted either).
    pub fn update_track(&mut self, id: &str, patch: &TrackPatch) -> Result<(), StoreError> {
        let Some(track) = self.tracks.iter_mut().find(|t| t.id == id) else {
            return Ok(());
        };
        patch.apply(track);
        self.persist()
    }

    /// Delete the track matching `id` after operator confirmation.
    ///
    /// Returns whether a track was removed. Declining the prompt leaves
    /// the collection untouched.
    pub fn delete_track(&mut self, id: &str, confirm: &dyn Confirm) -> Result<bool, StoreError> {
        if !confirm.confirm(DELETE_WARNING) {
            return Ok(false);
        }
        let before = self.tracks.len();
        self.tracks.retain(|t| t.id != id);
        if self.tracks.len() == before {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    /// Drop everything and restore the seed collection.
    pub fn reset_to_seed(&mut self) -> Result<(), StoreError> {
        self.tracks = seed::seed_tracks();
        self.persist()
    }

    /// Mirror the collection to storage (post-load only).
    ///
    /// On failure the in-memory state stands; the error is logged and
    /// returned so the surface can tell the operator.
    fn persist(&self) -> Result<(), StoreError> {
        if self.is_loading {
            return Ok(());
        }
        self.backend.save(&self.tracks).inspect_err(|e| {
            tracing::error!("Failed to persist catalog: {e}");
        })
    }
}


#[cfg(test)]
mod prop_tests {
    use super::*;
    use crate::model::{Language, Project};
    use crate::test_utils::MemoryStorage;
    use proptest::prelude::*;

    fn arb_language() -> impl Strategy<Value = Language> {
        prop_oneof![
            Just(Language::Mandarin),
            Just(Language::Taiwanese),
            Just(Language::Japanese),
            Just(Language::Korean),
            Just(Language::English),
        ]
    }

    fn arb_track() -> impl Strategy<Value = Track> {
        (
            "[a-z0-9_]{1,12}",
            ".{0,40}",
            prop::collection::vec(arb_language(), 1..4),
            any::<bool>(),
            prop::option::of(".{0,40}"),
        )
            .prop_map(|(id, title, languages, pick, lyrics)| Track {
                id,
                title,
                artist: "Willwi".to_string(),
                version_label: None,
                release_date: "2024-01-01".to_string(),
                languages,
                project: Project::Independent,
                is_editors_pick: pick,
                isrc: "TW-A01-24-00001".to_string(),
                upc: "198000000001".to_string(),
                spotify_id: "spot".to_string(),
                youtube_id: None,
                cover_image: "https://example.com/c.jpg".to_string(),
                description: None,
                lyrics,
                lyric_video_url: None,
                musixmatch_url: None,
                youtube_music_url: None,
                apple_music_url: None,
            })
    }

    proptest! {
        /// serialize -> deserialize -> serialize is byte-identical
        #[test]
        fn prop_round_trip_idempotent(tracks in prop::collection::vec(arb_track(), 0..8)) {
            let first = serde_json::to_string(&tracks).unwrap();
            let parsed: Vec<Track> = serde_json::from_str(&first).unwrap();
            let second = serde_json::to_string(&parsed).unwrap();
            prop_assert_eq!(first, second);
        }

        /// add_track always prepends, whatever is already stored
        #[test]
        fn prop_add_prepends(existing in prop::collection::vec(arb_track(), 0..8),
                             new in arb_track()) {
            let mut store = TrackStore::open(MemoryStorage::with_tracks(existing.clone()));
            store.add_track(new.clone()).unwrap();
            prop_assert_eq!(store.tracks().len(), existing.len() + 1);
            prop_assert_eq!(&store.tracks()[0], &new);
        }
    }
}
