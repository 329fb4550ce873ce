//! Lint errors.

use std::io;
use std::path::PathBuf;

use mypy_config::ConfigError;
use thiserror::Error;

/// A lint request failed in a way the user cannot fix from the buffer.
///
/// Checker failures and invalid command settings are not errors: they are
/// reported as a diagnostic on the document instead.
#[derive(Debug, Error)]
pub enum LintError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to write shadow file: {0}")]
    ShadowFile(#[source] io::Error),
    #[error("failed to run `{executable}`: {source}")]
    Spawn {
        executable: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to read {}: {source}", path.display())]
    ReadSource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
