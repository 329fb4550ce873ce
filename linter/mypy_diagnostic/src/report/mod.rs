//! mypy report parsing.
//!
//! mypy prints one finding per line:
//!
//! ```text
//! pkg/mod.py:12:5: error: Incompatible types in assignment
//! pkg/mod.py:30: note: Revealed type is "builtins.int"
//! ```
//!
//! Lines are 1-based, columns 0-based, and the column is absent in some mypy
//! versions. Only lines naming the target file (relative to the working
//! directory, or absolute) are relevant; findings about imported modules are
//! dropped. Each line is classified into a [`ReportLine`]; a malformed line
//! never stops the rest of the report from being read.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::{Diagnostic, LineLookup, Severity};

#[expect(clippy::expect_used, reason = "literal pattern, checked by tests")]
static ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^:(\d+):(?:(\d+):)? (error|warning|note): (.*)$").expect("valid entry pattern")
});

/// A parsed finding, still in report coordinates (0-based, unclamped).
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct ReportEntry<'a> {
    pub line: u32,
    pub column: Option<u32>,
    pub severity: Severity,
    pub message: &'a str,
}

/// Classification of one report line.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ReportLine<'a> {
    /// Not about the target file (another module, a summary line, blank).
    Foreign,
    /// About the target file but not in the expected grammar. Holds the text
    /// after the path prefix.
    Malformed(&'a str),
    Entry(ReportEntry<'a>),
}

/// Parser bound to one target file and working directory.
#[derive(Clone, Debug)]
pub struct ReportParser {
    file_path: std::path::PathBuf,
    /// Path prefixes to try, in order: relative to the working directory, then absolute.
    prefixes: Vec<String>,
}

impl ReportParser {
    pub fn new(file_path: &Path, working_directory: &Path) -> Self {
        let mut prefixes = Vec::with_capacity(2);
        if let Some(relative) = pathdiff::diff_paths(file_path, working_directory) {
            let relative = relative.to_string_lossy().into_owned();
            if !relative.is_empty() {
                prefixes.push(relative);
            }
        }
        let absolute = file_path.to_string_lossy().into_owned();
        if !prefixes.contains(&absolute) {
            prefixes.push(absolute);
        }
        ReportParser {
            file_path: file_path.to_path_buf(),
            prefixes,
        }
    }

    /// Return the part of `line` after the target path, starting at its `:`.
    fn strip_target<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.prefixes.iter().find_map(|prefix| {
            line.strip_prefix(prefix.as_str())
                .filter(|tail| tail.starts_with(':'))
        })
    }

    pub fn classify<'a>(&self, line: &'a str) -> ReportLine<'a> {
        let Some(tail) = self.strip_target(line) else {
            return ReportLine::Foreign;
        };
        let Some(caps) = ENTRY.captures(tail) else {
            return ReportLine::Malformed(tail);
        };

        // 1-based in the report; a line 0 or an overflowing number is garbage.
        let Some(line) = caps[1].parse::<u32>().ok().and_then(|n| n.checked_sub(1)) else {
            return ReportLine::Malformed(tail);
        };
        let column = match caps.get(2) {
            Some(m) => match m.as_str().parse::<u32>() {
                Ok(column) => Some(column),
                Err(_) => return ReportLine::Malformed(tail),
            },
            None => None,
        };
        let Some(severity) = Severity::from_report_label(&caps[3]) else {
            return ReportLine::Malformed(tail);
        };
        let message = caps.get(4).map_or("", |m| m.as_str());

        ReportLine::Entry(ReportEntry {
            line,
            column,
            severity,
            message,
        })
    }

    /// Parse a whole report into diagnostics, in report order.
    ///
    /// `lines` is the buffer the checker saw; it bounds every position.
    pub fn parse(&self, output: &str, lines: &dyn LineLookup) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        // `lines()` splits on both "\n" and "\r\n"
        for line in output.lines() {
            match self.classify(line) {
                ReportLine::Foreign => {}
                ReportLine::Malformed(tail) => {
                    tracing::debug!(line = tail, "report line does not match the expected format");
                }
                ReportLine::Entry(entry) => diagnostics.push(self.to_diagnostic(&entry, lines)),
            }
        }
        diagnostics
    }

    fn to_diagnostic(&self, entry: &ReportEntry<'_>, lines: &dyn LineLookup) -> Diagnostic {
        let last_line = lines.line_count().saturating_sub(1);
        let line = if entry.line > last_line {
            tracing::debug!(
                reported = entry.line,
                last_line,
                "reported line is past the end of the buffer"
            );
            last_line
        } else {
            entry.line
        };
        let column = entry
            .column
            .map(|column| clamp_column(column, lines.line_len(line).unwrap_or(0)));

        Diagnostic::new(entry.severity, &self.file_path, entry.message).located(line, column, lines)
    }
}

/// Clamp a reported column to the length of its line.
///
/// mypy occasionally reports a column one past the last character (pointing
/// at the line terminator). Anything further out is an upstream
/// inconsistency; it is logged and clamped all the same.
pub fn clamp_column(column: u32, line_len: u32) -> u32 {
    if column <= line_len {
        return column;
    }
    if column > line_len.saturating_add(1) {
        tracing::debug!(column, line_len, "reported column exceeds line length by more than one");
    }
    line_len
}

/// Parse `output` for findings about `file_path`.
///
/// Shorthand for [`ReportParser::new`] followed by [`ReportParser::parse`].
pub fn parse_report(
    output: &str,
    file_path: &Path,
    working_directory: &Path,
    lines: &dyn LineLookup,
) -> Vec<Diagnostic> {
    ReportParser::new(file_path, working_directory).parse(output, lines)
}
