//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\catalog-minder\config.toml
//! - macOS: ~/Library/Application Support/catalog-minder/config.toml
//! - Linux: ~/.config/catalog-minder/config.toml
//!
//! The config file is human-readable and editable. Settings are
//! loaded at startup; loading never fails - a missing or broken file
//! falls back to defaults with a logged warning.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API credentials (keep separate for potential future encryption)
    pub credentials: Credentials,

    /// Catalog settings
    pub catalog: CatalogConfig,
}

/// API credentials
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    /// Gemini API key for track commentary
    pub gemini_api_key: Option<String>,
}

/// Catalog settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Override for the catalog database file (default: OS data dir)
    pub database_path: Option<PathBuf>,

    /// Artist name prefilled when adding tracks
    pub default_artist: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            default_artist: "Willwi".to_string(),
        }
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("catalog-minder"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from disk
///
/// Returns default config if file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        tracing::warn!("Could not determine config directory, using defaults");
        return Config::default();
    };

    if !path.exists() {
        tracing::info!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match std::fs::read_to_string(&path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => {
                tracing::info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::error!("Failed to parse config file {:?}: {}", path, e);
                tracing::warn!("Using default configuration");
                Config::default()
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file {:?}: {}", path, e);
            Config::default()
        }
    }
}

/// Save configuration to the OS-standard config directory.
pub fn save(config: &Config) -> Result<(), ConfigError> {
    let dir = config_dir().ok_or(ConfigError::NoConfigDir)?;
    save_to(&dir, config)
}

/// Write `config.toml` under `dir`, creating the directory if needed.
///
/// The write goes through a temp file and a rename so a crash mid-write
/// never leaves a truncated config behind.
pub fn save_to(dir: &Path, config: &Config) -> Result<(), ConfigError> {
    std::fs::create_dir_all(dir)
        .map_err(|e| ConfigError::CreateDir(dir.to_path_buf(), e))?;

    let contents = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;

    let path = dir.join("config.toml");
    let temp_path = path.with_extension("toml.tmp");
    std::fs::write(&temp_path, &contents).map_err(|e| ConfigError::Write(temp_path.clone(), e))?;
    std::fs::rename(&temp_path, &path)
        .map_err(|e| ConfigError::Rename(temp_path, path.clone(), e))?;

    tracing::info!("Saved config to {:?}", path);
    Ok(())
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to create config directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),

    #[error("Failed to write config to {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[credentials]"));
        assert!(toml.contains("[catalog]"));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.credentials.gemini_api_key = Some("test-key-123".to_string());
        config.catalog.database_path = Some(PathBuf::from("/srv/catalog.json"));

        let toml = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();

        assert_eq!(
            parsed.credentials.gemini_api_key,
            Some("test-key-123".to_string())
        );
        assert_eq!(
            parsed.catalog.database_path,
            Some(PathBuf::from("/srv/catalog.json"))
        );
    }

    #[test]
    fn test_save_to_writes_and_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("catalog-minder");

        let mut config = Config::default();
        config.credentials.gemini_api_key = Some("persisted-key".to_string());
        config.catalog.default_artist = "Someone Else".to_string();
        save_to(&nested, &config).unwrap();

        let path = nested.join("config.toml");
        let contents = std::fs::read_to_string(&path).unwrap();
        let reloaded: Config = toml::from_str(&contents).unwrap();
        assert_eq!(
            reloaded.credentials.gemini_api_key,
            Some("persisted-key".to_string())
        );
        assert_eq!(reloaded.catalog.default_artist, "Someone Else");

        // No temp file left behind after the rename
        assert!(!path.with_extension("toml.tmp").exists());
    }

    #[test]
    fn test_save_to_overwrites_previous_contents() {
        let dir = tempfile::tempdir().unwrap();

        let mut config = Config::default();
        config.credentials.gemini_api_key = Some("first".to_string());
        save_to(dir.path(), &config).unwrap();

        config.credentials.gemini_api_key = Some("second".to_string());
        save_to(dir.path(), &config).unwrap();

        let contents = std::fs::read_to_string(dir.path().join("config.toml")).unwrap();
        let reloaded: Config = toml::from_str(&contents).unwrap();
        assert_eq!(reloaded.credentials.gemini_api_key, Some("second".to_string()));
    }

    #[test]
    fn test_save_to_reports_unusable_directory() {
        let dir = tempfile::tempdir().unwrap();
        // A file where the config directory should be
        let blocked = dir.path().join("blocked");
        std::fs::write(&blocked, "not a directory").unwrap();

        let err = save_to(&blocked, &Config::default()).unwrap_err();
        assert!(matches!(err, ConfigError::CreateDir(_, _)));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        // Config with only some fields
        let toml = r#"
[credentials]
gemini_api_key = "my-key"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        // Specified field is set
        assert_eq!(config.credentials.gemini_api_key, Some("my-key".to_string()));

        // Other fields use defaults
        assert_eq!(config.catalog.default_artist, "Willwi");
        assert!(config.catalog.database_path.is_none());
    }
}
