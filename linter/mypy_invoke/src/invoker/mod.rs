//! Checker invocation.

use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use mypy_config::{choose_cache_directory, EffectiveConfig};

use crate::{
    ExternalToolError, InvocationDebug, InvocationPlan, InvokeError, ProcessRunner, ShadowFile,
    MYPYPATH_ENV,
};

/// Message shown when mypy fails instead of reporting on the file.
pub const FAILURE_MESSAGE: &str = "mypy failed to check this file; see the details below";

const SHOW_COLUMN_NUMBERS: &str = "--show-column-numbers";
const SHADOW_FILE: &str = "--shadow-file";
const INCREMENTAL: &str = "--incremental";
const CACHE_DIR: &str = "--cache-dir";

/// Base name used when the document path has none.
const FALLBACK_SHADOW_NAME: &str = "buffer.py";

/// The file to check.
#[derive(Clone, Copy, Debug)]
pub struct CheckTarget<'a> {
    pub path: &'a Path,
    /// Current buffer content; only read when `is_modified`.
    pub content: &'a str,
    /// Whether the buffer differs from what is on disk.
    pub is_modified: bool,
}

/// A run whose stderr was empty.
#[derive(Clone, Debug)]
pub struct Invocation {
    pub stdout: String,
    pub debug: InvocationDebug,
}

/// Runs mypy for one file at a time.
#[derive(Clone)]
pub struct CheckerInvoker {
    runner: Arc<dyn ProcessRunner>,
}

impl CheckerInvoker {
    pub fn new(runner: Arc<dyn ProcessRunner>) -> Self {
        CheckerInvoker { runner }
    }

    /// Run the checker on `target` and capture its report.
    ///
    /// Unsaved content goes through a [`ShadowFile`], so mypy reports against
    /// the real path while reading the buffer. Any stderr output is a failure,
    /// whatever the exit status.
    pub async fn invoke(
        &self,
        target: &CheckTarget<'_>,
        config: &EffectiveConfig,
        working_directory: &Path,
    ) -> Result<Invocation, InvokeError> {
        let cache_directory = if config.incremental {
            Some(choose_cache_directory(config, working_directory)?)
        } else {
            None
        };

        let shadow = if target.is_modified {
            let base_name = target
                .path
                .file_name()
                .unwrap_or_else(|| OsStr::new(FALLBACK_SHADOW_NAME));
            Some(
                ShadowFile::create(base_name, target.content)
                    .await
                    .map_err(InvokeError::ShadowFile)?,
            )
        } else {
            None
        };

        let plan = build_plan(
            target.path,
            shadow.as_ref().map(ShadowFile::path),
            cache_directory.as_deref(),
            config,
            working_directory,
        );
        tracing::debug!(
            executable = %plan.executable,
            arguments = ?plan.arguments,
            working_directory = %plan.working_directory.display(),
            "running mypy"
        );

        let result = self.runner.run(&plan).await;
        if let Some(shadow) = shadow {
            if let Err(error) = shadow.close() {
                tracing::debug!(%error, "failed to remove shadow file");
            }
        }
        let result = result.map_err(|source| InvokeError::Spawn {
            executable: plan.executable.clone(),
            source,
        })?;

        let debug = InvocationDebug {
            config: config.clone(),
            plan,
            shadowed: target.is_modified,
            result,
        };
        if !debug.result.stderr.is_empty() {
            return Err(ExternalToolError::new(FAILURE_MESSAGE, debug).into());
        }

        Ok(Invocation {
            stdout: debug.result.stdout.clone(),
            debug,
        })
    }
}

/// Argument order: base args, column numbers, shadow pair, incremental
/// options, then the real path last.
fn build_plan(
    file_path: &Path,
    shadow_path: Option<&Path>,
    cache_directory: Option<&Path>,
    config: &EffectiveConfig,
    working_directory: &Path,
) -> InvocationPlan {
    let real_path = path_arg(file_path);

    let mut arguments = config.base_args().to_vec();
    arguments.push(SHOW_COLUMN_NUMBERS.to_string());
    if let Some(shadow_path) = shadow_path {
        arguments.push(SHADOW_FILE.to_string());
        arguments.push(real_path.clone());
        arguments.push(path_arg(shadow_path));
    }
    if let Some(cache_directory) = cache_directory {
        arguments.push(INCREMENTAL.to_string());
        arguments.push(CACHE_DIR.to_string());
        arguments.push(path_arg(cache_directory));
    }
    arguments.push(real_path);

    let mut environment = BTreeMap::new();
    environment.insert(MYPYPATH_ENV.to_string(), config.extra_env_path.clone());

    InvocationPlan {
        executable: config.executable().to_string(),
        arguments,
        working_directory: PathBuf::from(working_directory),
        environment,
    }
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
