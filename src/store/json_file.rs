//! JSON file storage backend.
//!
//! The whole collection lives in one JSON file (an array of track
//! objects), by default under the OS data directory:
//! - Windows: %APPDATA%\catalog-minder\catalog.json
//! - macOS: ~/Library/Application Support/catalog-minder/catalog.json
//! - Linux: ~/.local/share/catalog-minder/catalog.json
//!
//! Writes go through a temp file and rename so a crash mid-write never
//! leaves a half-written catalog.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::{StorageBackend, StoreError};
use crate::model::Track;

/// File name of the persistence slot.
const CATALOG_FILE: &str = "catalog.json";

/// [`StorageBackend`] over a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Storage at an explicit file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Storage at the default OS data-directory location.
    pub fn default_location() -> Result<Self, StoreError> {
        let dir = dirs::data_dir().ok_or(StoreError::NoDataDir)?;
        Ok(Self::new(dir.join("catalog-minder").join(CATALOG_FILE)))
    }

    /// The file this backend reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageBackend for JsonFileStorage {
    fn load(&self) -> Result<Option<Vec<Track>>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&self.path).map_err(|source| StoreError::Read {
            path: self.path.clone(),
            source,
        })?;
        let tracks = serde_json::from_str(&contents)?;
        debug!("Read catalog from {:?}", self.path);
        Ok(Some(tracks))
    }

    fn save(&self, tracks: &[Track]) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir).map_err(|source| StoreError::Write {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        let contents = serde_json::to_string_pretty(tracks)?;

        // Write atomically (write to temp, then rename)
        let temp_path = self.path.with_extension("json.tmp");
        std::fs::write(&temp_path, &contents).map_err(|source| StoreError::Write {
            path: temp_path.clone(),
            source,
        })?;
        std::fs::rename(&temp_path, &self.path).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })?;

        debug!("Wrote {} tracks to {:?}", tracks.len(), self.path);
        Ok(())
    }
}
