//! Configuration errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error resolving the configuration for a lint run.
///
/// Every variant aborts the current lint only; the next request resolves
/// from scratch.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The command setting does not tokenize into plain words.
    #[error("invalid mypy command `{command}`: {reason}")]
    InvalidCommand {
        command: String,
        reason: &'static str,
    },
    /// The command setting tokenizes to nothing.
    #[error("mypy command is empty")]
    EmptyCommand,
    /// Incremental mode is on but the cache directory setting is empty.
    #[error("cache directory path is empty")]
    EmptyCacheDirectory,
    /// Settings supplied by the host have the wrong shape.
    #[error("invalid settings: {0}")]
    InvalidSettings(#[from] serde_json::Error),
    /// A discovered config file could not be read.
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ConfigError {
    /// Whether the user can fix this from the settings UI, as opposed to an
    /// environment or host failure.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, ConfigError::InvalidCommand { .. })
    }
}
