//! mypy-lint: type-check Python buffers with mypy and report diagnostics.
//!
//! A host (the `mypy-lint` CLI, the `mypy-lsp` server) owns one
//! [`LintSession`] and hands it [`Document`]s. Each lint request resolves its
//! configuration, runs mypy once and parses the report:
//!
//! ```text
//! Document ─► ConfigResolver ─► CheckerInvoker ─► ReportParser ─► Vec<Diagnostic>
//!                (mypy_config)     (mypy_invoke)    (mypy_diagnostic)
//! ```
//!
//! Results for a document that changed while mypy was running are dropped.

pub mod cli;
mod document;
mod error;
mod session;
mod tracing_setup;

pub use document::{BufferDocument, Document};
pub use error::LintError;
pub use session::{LintSession, INVALID_COMMAND_MESSAGE};
pub use tracing_setup::init_tracing;
