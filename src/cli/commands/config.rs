//! Settings command.

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use crate::config::{self, Config};
use crate::error::Result;

/// Arguments for `config`.
///
/// With no flags the current settings are printed. Passing an empty
/// value clears an optional setting.
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Gemini API key used by `insight`
    #[arg(long)]
    pub api_key: Option<String>,
    /// Catalog database file location
    #[arg(long)]
    pub database_path: Option<PathBuf>,
    /// Artist name prefilled when adding tracks
    #[arg(long)]
    pub default_artist: Option<String>,
}

impl ConfigArgs {
    /// True when no setting was given (show-only invocation).
    pub fn is_empty(&self) -> bool {
        self.api_key.is_none() && self.database_path.is_none() && self.default_artist.is_none()
    }

    /// Merge the given flags into `config`.
    pub fn apply(&self, config: &mut Config) {
        if let Some(key) = &self.api_key {
            config.credentials.gemini_api_key = Some(key.clone()).filter(|k| !k.is_empty());
        }
        if let Some(path) = &self.database_path {
            config.catalog.database_path =
                Some(path.clone()).filter(|p| !p.as_os_str().is_empty());
        }
        if let Some(artist) = &self.default_artist
            && !artist.is_empty()
        {
            config.catalog.default_artist = artist.clone();
        }
    }
}

/// Show the current settings, or persist the given changes.
pub fn cmd_config(args: &ConfigArgs) -> Result<()> {
    let mut config = crate::config::load();

    if args.is_empty() {
        let key = match &config.credentials.gemini_api_key {
            Some(_) => "(set)",
            None => "(not set)",
        };
        let database = config
            .catalog
            .database_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(default location)".to_string());
        println!("api key:         {key}");
        println!("database path:   {database}");
        println!("default artist:  {}", config.catalog.default_artist);
        if let Some(path) = config::config_path() {
            println!("config file:     {}", path.display());
        }
        return Ok(());
    }

    args.apply(&mut config);
    config::save(&config)?;
    info!("Configuration updated");
    println!("Configuration saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_flags() -> ConfigArgs {
        ConfigArgs {
            api_key: None,
            database_path: None,
            default_artist: None,
        }
    }

    #[test]
    fn test_apply_sets_only_given_fields() {
        let mut config = Config::default();
        let args = ConfigArgs {
            api_key: Some("new-key".to_string()),
            ..no_flags()
        };
        assert!(!args.is_empty());
        args.apply(&mut config);
        assert_eq!(config.credentials.gemini_api_key, Some("new-key".to_string()));
        assert!(config.catalog.database_path.is_none());
        assert_eq!(config.catalog.default_artist, "Willwi");
    }

    #[test]
    fn test_apply_empty_value_clears_optional_setting() {
        let mut config = Config::default();
        config.credentials.gemini_api_key = Some("old-key".to_string());
        config.catalog.database_path = Some(PathBuf::from("/srv/catalog.json"));

        let args = ConfigArgs {
            api_key: Some(String::new()),
            database_path: Some(PathBuf::new()),
            ..no_flags()
        };
        args.apply(&mut config);
        assert!(config.credentials.gemini_api_key.is_none());
        assert!(config.catalog.database_path.is_none());
    }

    #[test]
    fn test_no_flags_is_show_only() {
        assert!(no_flags().is_empty());
    }
}
