//! Invocation inputs and outputs.

use std::collections::BTreeMap;
use std::path::PathBuf;

use mypy_config::EffectiveConfig;

/// Environment variable mypy reads extra module search paths from.
pub const MYPYPATH_ENV: &str = "MYPYPATH";

/// Everything needed to start the checker once.
///
/// `environment` holds overrides only; the rest is inherited from this process.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvocationPlan {
    pub executable: String,
    pub arguments: Vec<String>,
    pub working_directory: PathBuf,
    pub environment: BTreeMap<String, String>,
}

/// Captured outcome of a finished process.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawResult {
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// What was run and what came back, for debug logging.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvocationDebug {
    pub config: EffectiveConfig,
    pub plan: InvocationPlan,
    /// Whether unsaved content was passed through a shadow file.
    pub shadowed: bool,
    pub result: RawResult,
}
