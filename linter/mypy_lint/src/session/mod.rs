//! The lint pipeline for one document at a time.

use std::path::Path;
use std::sync::Arc;

use mypy_config::{
    choose_working_directory, ConfigResolver, ProjectRoots, Settings, SettingsStore,
};
use mypy_diagnostic::{parse_report, Diagnostic, SourceLines};
use mypy_invoke::{CheckTarget, CheckerInvoker, InvokeError, ProcessRunner};
use tracing::Instrument;

use crate::{Document, LintError};

/// Message of the diagnostic reported for an unusable command setting.
pub const INVALID_COMMAND_MESSAGE: &str = "The mypy command setting is invalid";

/// Lints documents with one settings store, config resolver and runner.
///
/// Requests may run concurrently; they share only the settings snapshot and
/// the config-file lookup cache.
pub struct LintSession {
    settings: Arc<SettingsStore>,
    resolver: ConfigResolver,
    invoker: CheckerInvoker,
    roots: Arc<dyn ProjectRoots>,
}

impl LintSession {
    pub fn new(
        settings: Arc<SettingsStore>,
        runner: Arc<dyn ProcessRunner>,
        roots: Arc<dyn ProjectRoots>,
    ) -> Self {
        LintSession {
            settings,
            resolver: ConfigResolver::default(),
            invoker: CheckerInvoker::new(runner),
            roots,
        }
    }

    #[must_use]
    pub fn with_resolver(mut self, resolver: ConfigResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    pub fn resolver(&self) -> &ConfigResolver {
        &self.resolver
    }

    /// Lint `document` as it is now.
    ///
    /// Returns `Ok(None)` when there is nothing to report for this request:
    /// the document has no path, was closed, or its text changed before mypy
    /// finished. A newer request covers the new text.
    pub async fn lint(
        &self,
        document: &dyn Document,
    ) -> Result<Option<Vec<Diagnostic>>, LintError> {
        let Some(path) = document.path() else {
            return Ok(None);
        };
        let settings = self.settings.snapshot();
        let lines = SourceLines::new(document.text());
        let is_modified = document.is_modified();

        let span = tracing::debug_span!("lint", file = %path.display());
        let diagnostics = self
            .check(&settings, path, &lines, is_modified)
            .instrument(span)
            .await?;

        if !document.is_alive() || document.text() != lines.text() {
            if settings.debug {
                tracing::debug!(
                    file = %path.display(),
                    "lint aborted because the document changed"
                );
            }
            return Ok(None);
        }

        if settings.debug {
            tracing::debug!(
                file = %path.display(),
                diagnostics = ?diagnostics,
                "lint finished"
            );
        }
        Ok(Some(diagnostics))
    }

    async fn check(
        &self,
        settings: &Settings,
        path: &Path,
        lines: &SourceLines,
        is_modified: bool,
    ) -> Result<Vec<Diagnostic>, LintError> {
        let config = match self.resolver.resolve(settings, path).await {
            Ok(config) => config,
            Err(err) if err.is_user_facing() => {
                return Ok(vec![Diagnostic::tool_failure(
                    path,
                    INVALID_COMMAND_MESSAGE,
                    &err.to_string(),
                    lines,
                )]);
            }
            Err(err) => return Err(err.into()),
        };
        let working_directory = choose_working_directory(&config, path, self.roots.as_ref());

        let target = CheckTarget {
            path,
            content: lines.text(),
            is_modified,
        };
        match self.invoker.invoke(&target, &config, &working_directory).await {
            Ok(invocation) => {
                if settings.debug {
                    tracing::debug!(debug = ?invocation.debug, "mypy finished");
                }
                Ok(parse_report(
                    &invocation.stdout,
                    path,
                    &working_directory,
                    lines,
                ))
            }
            Err(InvokeError::Tool(err)) => {
                if settings.debug {
                    tracing::debug!(debug = ?err.debug, "mypy failed");
                }
                Ok(vec![Diagnostic::tool_failure(
                    path,
                    err.message,
                    &err.stderr,
                    lines,
                )])
            }
            Err(InvokeError::Config(err)) => Err(err.into()),
            Err(InvokeError::ShadowFile(err)) => Err(LintError::ShadowFile(err)),
            Err(InvokeError::Spawn { executable, source }) => {
                Err(LintError::Spawn { executable, source })
            }
        }
    }
}
