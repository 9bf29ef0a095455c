//! Application-wide error types.
//!
//! Library modules use specific error types via `thiserror`
//! ([`crate::store::StoreError`], [`crate::config::ConfigError`]);
//! this module aggregates them for the CLI commands, and `main` uses
//! `anyhow` for convenient propagation at the boundary.

/// Result type used by the CLI command handlers.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Catalog storage error
    #[error("Store error: {0}")]
    Store(#[from] crate::store::StoreError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Required-field validation failure on create
    #[error("{0}")]
    Validation(String),

    /// Lookup by id found nothing
    #[error("No track with id '{0}'")]
    UnknownTrack(String),
}

impl Error {
    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an unknown-track error.
    pub fn unknown_track(id: impl Into<String>) -> Self {
        Self::UnknownTrack(id.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_track_display() {
        let err = Error::unknown_track("rec9");
        assert!(err.to_string().contains("rec9"));
    }

    #[test]
    fn test_validation_display_is_bare_message() {
        let err = Error::validation("請至少輸入歌名與 ISRC");
        assert_eq!(err.to_string(), "請至少輸入歌名與 ISRC");
    }

    #[test]
    fn test_store_error_converts() {
        let store_err = crate::store::StoreError::NoDataDir;
        let err: Error = store_err.into();
        assert!(matches!(err, Error::Store(_)));
    }

    #[test]
    fn test_config_error_converts() {
        let config_err = crate::config::ConfigError::NoConfigDir;
        let err: Error = config_err.into();
        assert!(matches!(err, Error::Config(_)));
    }
}
