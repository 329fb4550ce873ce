//! Diagnostic model for mypy-lint.
//!
//! Everything an editor needs to render a checker finding lives here:
//! - [`Diagnostic`]: one positioned issue with a severity
//! - [`SourceLines`]: line lookup over a buffer snapshot, used for clamping
//! - [`report`]: the parser for mypy's line-oriented report format
//! - [`emitter`]: terminal and JSON output for the CLI
//!
//! # Positions
//!
//! All positions are 0-based. Columns count characters, which is how mypy
//! reports them. Hosts with a different column unit (LSP uses UTF-16) convert
//! at their boundary.

mod diagnostic;
pub mod emitter;
pub mod report;
mod source_lines;

pub use diagnostic::{highlight_range, Diagnostic, Position, Range, Severity};
pub use report::{parse_report, ReportEntry, ReportLine, ReportParser};
pub use source_lines::{LineLookup, SourceLines};
