//! Core diagnostic types.
//!
//! Defines [`Diagnostic`], [`Severity`], [`Position`] and [`Range`]: the shape
//! every lint pass hands back to the editor.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::LineLookup;

/// Severity level for diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    /// Map a severity label from a mypy report line.
    ///
    /// mypy's `note` has no direct editor counterpart and becomes `Info`.
    pub fn from_report_label(label: &str) -> Option<Self> {
        match label {
            "error" => Some(Severity::Error),
            "warning" => Some(Severity::Warning),
            "note" => Some(Severity::Info),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A 0-based line/character position.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default, PartialOrd, Ord)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub const fn new(line: u32, character: u32) -> Self {
        Position { line, character }
    }
}

/// A half-open range: `end` is exclusive.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub const fn new(start: Position, end: Position) -> Self {
        Range { start, end }
    }

    /// Range covering a whole line of `len` characters.
    pub const fn whole_line(line: u32, len: u32) -> Self {
        Range {
            start: Position::new(line, 0),
            end: Position::new(line, len),
        }
    }
}

/// Compute the highlight range for a finding at `line`, `column`.
///
/// Without a column the whole line is highlighted. With a column, the range
/// runs from the column to the end of the next identifier-like run (ASCII
/// letters and digits, `_`, `$`) at or after it, or to the end of the line if there is none.
/// A column past the end of the line collapses to an empty range at line end.
pub fn highlight_range(lines: &dyn LineLookup, line: u32, column: Option<u32>) -> Range {
    let text = lines.line_text(line).unwrap_or("");
    let len = u32::try_from(text.chars().count()).unwrap_or(u32::MAX);

    let Some(column) = column else {
        return Range::whole_line(line, len);
    };
    let column = column.min(len);

    let is_word = |c: char| c.is_ascii_alphanumeric() || c == '_' || c == '$';
    let rest = text.chars().skip(column as usize);
    let mut end = len;
    let mut in_word = false;
    for (offset, c) in rest.enumerate() {
        let at = column + u32::try_from(offset).unwrap_or(u32::MAX);
        if is_word(c) {
            in_word = true;
        } else if in_word {
            end = at;
            break;
        }
    }

    Range::new(Position::new(line, column), Position::new(line, end))
}

/// A positioned issue reported against one file.
///
/// `column` is `None` when the checker did not report one; renderers then
/// highlight the entire line, which `range` already reflects.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Diagnostic {
    pub severity: Severity,
    pub file_path: PathBuf,
    /// 0-based line.
    pub line: u32,
    /// 0-based column in characters, if known.
    pub column: Option<u32>,
    /// Highlight range, end exclusive.
    pub range: Range,
    /// Short text shown inline.
    pub message: String,
    /// Long-form detail, shown on demand (e.g. raw checker stderr).
    pub description: Option<String>,
}

impl Diagnostic {
    /// Create a diagnostic at the start of the file; position it with [`Self::located`].
    pub fn new(severity: Severity, file_path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Diagnostic {
            severity,
            file_path: file_path.into(),
            line: 0,
            column: None,
            range: Range::default(),
            message: message.into(),
            description: None,
        }
    }

    pub fn error(file_path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, file_path, message)
    }

    /// Position the diagnostic, deriving its highlight range from `lines`.
    #[must_use]
    pub fn located(mut self, line: u32, column: Option<u32>, lines: &dyn LineLookup) -> Self {
        self.line = line;
        self.column = column;
        self.range = highlight_range(lines, line, column);
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The synthetic diagnostic standing in for a failed checker run.
    ///
    /// Highlights the whole first line; `details` is kept verbatim in a fenced
    /// block so hosts rendering markdown show it untouched.
    pub fn tool_failure(
        file_path: &Path,
        message: impl Into<String>,
        details: &str,
        lines: &dyn LineLookup,
    ) -> Self {
        Self::error(file_path, message)
            .located(0, None, lines)
            .with_description(format!("```\n{details}\n```"))
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

impl fmt::Display for Diagnostic {
    /// mypy-style single line: `path:line:col: severity: message`, 1-based.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file_path.display(), self.line + 1)?;
        if let Some(column) = self.column {
            write!(f, ":{}", column + 1)?;
        }
        write!(f, ": {}: {}", self.severity, self.message)
    }
}

#[cfg(test)]
mod tests;
