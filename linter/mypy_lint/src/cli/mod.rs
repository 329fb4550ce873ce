//! The `mypy-lint check` command.
//!
//! Argument parsing and report rendering live here rather than in `main.rs`
//! so they can be tested without a process.

use std::io::Write;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use mypy_config::{Settings, SettingsStore, WorkspaceRoots};
use mypy_diagnostic::emitter::{ColorMode, DiagnosticEmitter, JsonEmitter, TerminalEmitter};
use mypy_diagnostic::Diagnostic;
use mypy_invoke::ProcessRunner;

use crate::{BufferDocument, LintError, LintSession};

/// Output format for diagnostics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Options for `mypy-lint check`.
///
/// Unset options fall back to the [`Settings`] defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CheckOptions {
    pub file: PathBuf,
    /// Read the buffer content from stdin instead of the file.
    pub stdin: bool,
    pub command: Option<String>,
    pub mypypath: Option<String>,
    pub incremental: bool,
    pub cache_dir: Option<String>,
    pub format: OutputFormat,
    pub debug: bool,
}

impl CheckOptions {
    /// Parse the arguments that follow `check`.
    pub fn parse(args: &[String]) -> Result<Self, String> {
        let mut options = CheckOptions::default();
        let mut file = None;

        for arg in args {
            if arg == "--stdin" {
                options.stdin = true;
            } else if arg == "--incremental" {
                options.incremental = true;
            } else if arg == "--debug" {
                options.debug = true;
            } else if let Some(command) = arg.strip_prefix("--command=") {
                options.command = Some(command.to_string());
            } else if let Some(path) = arg.strip_prefix("--mypypath=") {
                options.mypypath = Some(path.to_string());
            } else if let Some(dir) = arg.strip_prefix("--cache-dir=") {
                options.cache_dir = Some(dir.to_string());
            } else if let Some(format) = arg.strip_prefix("--format=") {
                options.format = match format {
                    "text" => OutputFormat::Text,
                    "json" => OutputFormat::Json,
                    other => {
                        return Err(format!("unknown format '{other}' (expected text or json)"))
                    }
                };
            } else if arg.starts_with('-') {
                return Err(format!("unknown option '{arg}'"));
            } else if file.is_none() {
                file = Some(PathBuf::from(arg));
            } else {
                return Err(format!("unexpected argument '{arg}'"));
            }
        }

        options.file = file.ok_or_else(|| "missing file path".to_string())?;
        Ok(options)
    }

    /// Settings for this run: defaults with the command-line overrides.
    pub fn settings(&self) -> Settings {
        let mut settings = Settings {
            lint_on_change: false,
            incremental_mode: self.incremental,
            debug: self.debug,
            ..Settings::default()
        };
        if let Some(command) = &self.command {
            settings.mypy_command.clone_from(command);
        }
        if let Some(path) = &self.mypypath {
            settings.env_mypy_path.clone_from(path);
        }
        if let Some(dir) = &self.cache_dir {
            settings.incremental_cache_directory.clone_from(dir);
        }
        settings
    }
}

/// Lint one file from the command line.
///
/// `current_dir` is the project root when the file is inside it. With
/// `stdin_text`, that text is linted in place of the file content and counts
/// as unsaved when it differs from the file.
pub async fn check(
    options: &CheckOptions,
    current_dir: &Path,
    stdin_text: Option<String>,
    runner: Arc<dyn ProcessRunner>,
) -> Result<Vec<Diagnostic>, LintError> {
    let path = absolute_file_path(current_dir, &options.file);
    let on_disk = tokio::fs::read_to_string(&path).await;

    let document = match stdin_text {
        Some(text) => BufferDocument::edited(path, text, on_disk.ok()),
        None => {
            let text = on_disk.map_err(|source| LintError::ReadSource {
                path: path.clone(),
                source,
            })?;
            BufferDocument::saved(path, text)
        }
    };

    let session = LintSession::new(
        Arc::new(SettingsStore::new(options.settings())),
        runner,
        Arc::new(WorkspaceRoots::new([current_dir.to_path_buf()])),
    );
    Ok(session.lint(&document).await?.unwrap_or_default())
}

/// `file` joined onto `current_dir` with `.` and `..` resolved lexically, so
/// config lookup and root matching see the real directory layout.
fn absolute_file_path(current_dir: &Path, file: &Path) -> PathBuf {
    let mut path = PathBuf::new();
    for component in current_dir.join(file).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match path.components().next_back() {
                Some(Component::Normal(_)) => {
                    path.pop();
                }
                // `..` above the root is the root
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => path.push(component),
            },
            _ => path.push(component),
        }
    }
    path
}

/// Write `diagnostics` and a summary in `format`.
pub fn emit_report<W: Write>(
    diagnostics: &[Diagnostic],
    format: OutputFormat,
    writer: W,
    is_tty: bool,
) {
    let error_count = diagnostics.iter().filter(|d| d.is_error()).count();
    let warning_count = diagnostics.iter().filter(|d| d.is_warning()).count();

    match format {
        OutputFormat::Text => {
            let mut emitter = TerminalEmitter::with_color_mode(writer, ColorMode::Auto, is_tty);
            emitter.emit_all(diagnostics);
            emitter.emit_summary(error_count, warning_count);
            emitter.flush();
        }
        OutputFormat::Json => {
            let mut emitter = JsonEmitter::new(writer);
            emitter.begin();
            emitter.emit_all(diagnostics);
            emitter.end();
            emitter.flush();
        }
    }
}
