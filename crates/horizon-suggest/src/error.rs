//! Error types for suggestion settings.
//!
//! The engine itself never fails: projection failures, stale debounce fires
//! and oversized result sets are all ordinary outcomes. Errors only arise
//! while loading configuration.

use std::path::PathBuf;

/// Result type alias for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;

/// Errors that can occur while loading [`SuggestSettings`](crate::SuggestSettings).
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// TOML parsing or schema error.
    #[error("Invalid suggestion settings: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configured match strategy does not exist.
    #[error("Unknown match strategy '{name}' (expected one of: substring, like, prefix)")]
    UnknownStrategy { name: String },

    /// File I/O error.
    #[error("Failed to read settings '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SettingsError {
    /// Create an unknown strategy error.
    pub fn unknown_strategy(name: impl Into<String>) -> Self {
        Self::UnknownStrategy { name: name.into() }
    }

    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
