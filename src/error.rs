//! Error types for the insta-scraper application.

use thiserror::Error;

use crate::export::SelectionError;

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration value for '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    #[error("Missing required configuration: {0}")]
    MissingConfig(String),

    // Profile access errors
    #[error("Specified profile does not exist: {0}")]
    NotFound(String),

    #[error("Private profile '{0}': operation requires a public profile")]
    Forbidden(String),

    // Remote source errors
    #[error("API error: {0}")]
    Api(String),

    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    #[error("Fetch failed: {0}")]
    TransientFetch(String),

    // Export errors
    #[error("Partial export: aborted after {units} unit(s): {source}")]
    PartialExport {
        units: u64,
        #[source]
        source: Box<Error>,
    },

    #[error("Invalid selection: {0}")]
    Selection(#[from] SelectionError),

    // File system errors
    #[error("Invalid filename (path traversal attempt): {0}")]
    InvalidFilename(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    // URL parsing errors
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wrap an error that interrupted an export after `units` were written.
    pub fn partial(units: u64, source: Error) -> Self {
        Error::PartialExport {
            units,
            source: Box::new(source),
        }
    }

    /// Whether the error should terminate the whole process rather than
    /// just the current menu operation.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}

/// Process exit codes.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const NOT_FOUND: i32 = 1;
    pub const API_ERROR: i32 = 2;
    pub const CONFIG_ERROR: i32 = 3;
    pub const DOWNLOAD_ERROR: i32 = 4;
    pub const UNEXPECTED_ERROR: i32 = 5;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_export_keeps_source() {
        let err = Error::partial(3, Error::TransientFetch("connection reset".into()));
        assert!(err.to_string().contains("after 3 unit(s)"));
        assert!(err.to_string().contains("connection reset"));
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_not_found_is_fatal() {
        assert!(Error::NotFound("ghost".into()).is_fatal());
        assert!(!Error::Forbidden("locked".into()).is_fatal());
    }

    #[test]
    fn test_lookup_failures_other_than_not_found_are_recoverable() {
        assert!(!Error::RateLimited(60).is_fatal());
        assert!(!Error::TransientFetch("timeout".into()).is_fatal());
        assert!(!Error::Api("HTTP 500".into()).is_fatal());
        assert!(!Error::ConfigValidation {
            field: "handle".into(),
            message: "invalid".into(),
        }
        .is_fatal());
    }
}
