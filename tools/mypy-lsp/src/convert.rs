//! Conversions between LSP types and mypy-lint types.

use std::path::PathBuf;

use mypy_diagnostic::{Diagnostic, LineLookup, Position, Severity};
use tower_lsp::lsp_types as lsp;
use tower_lsp::lsp_types::Url;

/// `source` of every published diagnostic.
pub const DIAGNOSTIC_SOURCE: &str = "mypy";

/// Local path of a Python document; `None` for anything that should not be linted.
pub fn python_file_path(uri: &Url) -> Option<PathBuf> {
    if uri.scheme() != "file" {
        return None;
    }
    let path = uri.to_file_path().ok()?;
    let extension = path.extension()?.to_str()?;
    matches!(extension, "py" | "pyi").then_some(path)
}

/// Local path of any `file:` URI.
pub fn file_path(uri: &Url) -> Option<PathBuf> {
    if uri.scheme() != "file" {
        return None;
    }
    uri.to_file_path().ok()
}

pub fn to_lsp_diagnostic(diagnostic: &Diagnostic, lines: &dyn LineLookup) -> lsp::Diagnostic {
    let message = match &diagnostic.description {
        Some(description) => format!("{}\n\n{description}", diagnostic.message),
        None => diagnostic.message.clone(),
    };

    lsp::Diagnostic {
        range: lsp::Range::new(
            to_lsp_position(diagnostic.range.start, lines),
            to_lsp_position(diagnostic.range.end, lines),
        ),
        severity: Some(to_lsp_severity(diagnostic.severity)),
        source: Some(DIAGNOSTIC_SOURCE.to_string()),
        message,
        ..Default::default()
    }
}

fn to_lsp_severity(severity: Severity) -> lsp::DiagnosticSeverity {
    match severity {
        Severity::Error => lsp::DiagnosticSeverity::ERROR,
        Severity::Warning => lsp::DiagnosticSeverity::WARNING,
        Severity::Info => lsp::DiagnosticSeverity::INFORMATION,
    }
}

fn to_lsp_position(position: Position, lines: &dyn LineLookup) -> lsp::Position {
    let character = lines
        .line_text(position.line)
        .map_or(position.character, |text| utf16_column(text, position.character));
    lsp::Position::new(position.line, character)
}

/// Convert a column counted in characters to UTF-16 code units.
pub fn utf16_column(line: &str, column: u32) -> u32 {
    let units: usize = line
        .chars()
        .take(column as usize)
        .map(char::len_utf16)
        .sum();
    u32::try_from(units).unwrap_or(u32::MAX)
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use mypy_diagnostic::SourceLines;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_python_file_path() {
        let py = Url::parse("file:///w/pkg/a.py").unwrap();
        assert_eq!(python_file_path(&py), Some(PathBuf::from("/w/pkg/a.py")));
        let stub = Url::parse("file:///w/pkg/a.pyi").unwrap();
        assert!(python_file_path(&stub).is_some());

        assert_eq!(python_file_path(&Url::parse("file:///w/a.txt").unwrap()), None);
        assert_eq!(python_file_path(&Url::parse("untitled:Untitled-1").unwrap()), None);
        assert_eq!(python_file_path(&Url::parse("file:///w/Makefile").unwrap()), None);
    }

    #[test]
    fn test_utf16_column() {
        assert_eq!(utf16_column("abc", 2), 2);
        // U+1F600 takes two UTF-16 code units
        assert_eq!(utf16_column("\u{1F600}x = 1", 2), 3);
        assert_eq!(utf16_column("é = 1", 1), 1);
        assert_eq!(utf16_column("ab", 10), 2);
    }

    #[test]
    fn test_to_lsp_diagnostic() {
        let lines = SourceLines::new("s = '\u{1F600}' + 1\n");
        let diagnostic = Diagnostic::new(Severity::Warning, "/w/a.py", "Unsupported operand")
            .located(0, Some(10), &lines);

        let lsp_diagnostic = to_lsp_diagnostic(&diagnostic, &lines);

        assert_eq!(lsp_diagnostic.severity, Some(lsp::DiagnosticSeverity::WARNING));
        assert_eq!(lsp_diagnostic.source.as_deref(), Some("mypy"));
        assert_eq!(lsp_diagnostic.message, "Unsupported operand");
        assert_eq!(lsp_diagnostic.range.start, lsp::Position::new(0, 11));
        assert_eq!(lsp_diagnostic.range.end, lsp::Position::new(0, 12));
    }

    #[test]
    fn test_to_lsp_diagnostic_appends_description() {
        let lines = SourceLines::new("import foo\n");
        let diagnostic = Diagnostic::tool_failure(
            std::path::Path::new("/w/a.py"),
            "mypy failed",
            "Traceback",
            &lines,
        );

        let lsp_diagnostic = to_lsp_diagnostic(&diagnostic, &lines);

        assert_eq!(lsp_diagnostic.severity, Some(lsp::DiagnosticSeverity::ERROR));
        assert_eq!(lsp_diagnostic.message, "mypy failed\n\n```\nTraceback\n```");
        assert_eq!(lsp_diagnostic.range.start, lsp::Position::new(0, 0));
        assert_eq!(lsp_diagnostic.range.end, lsp::Position::new(0, 10));
    }
}
