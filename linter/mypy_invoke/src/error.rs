//! Invocation errors.

use std::io;

use mypy_config::ConfigError;
use thiserror::Error;

use crate::InvocationDebug;

/// mypy wrote to stderr: it crashed, could not start, or rejected its
/// configuration.
///
/// Carries the raw stderr for display and the full invocation for logging.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ExternalToolError {
    pub message: String,
    pub stderr: String,
    pub debug: Box<InvocationDebug>,
}

impl ExternalToolError {
    pub fn new(message: impl Into<String>, debug: InvocationDebug) -> Self {
        ExternalToolError {
            message: message.into(),
            stderr: debug.result.stderr.clone(),
            debug: Box::new(debug),
        }
    }
}

/// Error type for checker invocation.
#[derive(Debug, Error)]
pub enum InvokeError {
    /// The configuration could not be turned into arguments.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The checker ran and reported a failure on stderr.
    #[error(transparent)]
    Tool(#[from] ExternalToolError),
    /// The shadow file for unsaved content could not be written.
    #[error("failed to write shadow file: {0}")]
    ShadowFile(#[source] io::Error),
    /// The checker process could not be started.
    #[error("failed to run `{executable}`: {source}")]
    Spawn {
        executable: String,
        #[source]
        source: io::Error,
    },
}
