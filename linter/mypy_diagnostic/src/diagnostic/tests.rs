use super::*;
use crate::SourceLines;
use pretty_assertions::assert_eq;

#[test]
fn test_severity_from_report_label() {
    assert_eq!(Severity::from_report_label("error"), Some(Severity::Error));
    assert_eq!(Severity::from_report_label("warning"), Some(Severity::Warning));
    assert_eq!(Severity::from_report_label("note"), Some(Severity::Info));
    assert_eq!(Severity::from_report_label("fatal"), None);
}

#[test]
fn test_highlight_whole_line_without_column() {
    let lines = SourceLines::new("import os\nx: int = 'a'\n");
    assert_eq!(highlight_range(&lines, 1, None), Range::whole_line(1, 12));
}

#[test]
fn test_highlight_word_at_column() {
    let lines = SourceLines::new("x = foo(bar)");
    assert_eq!(
        highlight_range(&lines, 0, Some(4)),
        Range::new(Position::new(0, 4), Position::new(0, 7))
    );
}

#[test]
fn test_highlight_skips_to_next_word() {
    let lines = SourceLines::new("x = foo(bar)");
    assert_eq!(
        highlight_range(&lines, 0, Some(7)),
        Range::new(Position::new(0, 7), Position::new(0, 11))
    );
}

#[test]
fn test_highlight_without_word_runs_to_line_end() {
    let lines = SourceLines::new("f(  )");
    assert_eq!(
        highlight_range(&lines, 0, Some(1)),
        Range::new(Position::new(0, 1), Position::new(0, 5))
    );
}

#[test]
fn test_highlight_column_at_line_end_is_empty() {
    let lines = SourceLines::new("import datetime\"");
    assert_eq!(
        highlight_range(&lines, 0, Some(16)),
        Range::new(Position::new(0, 16), Position::new(0, 16))
    );
}

#[test]
fn test_tool_failure_wraps_details() {
    let lines = SourceLines::new("import os\n");
    let diag = Diagnostic::tool_failure(
        Path::new("/p/a.py"),
        "mypy failed",
        "Traceback: boom",
        &lines,
    );

    assert!(diag.is_error());
    assert_eq!(diag.line, 0);
    assert_eq!(diag.column, None);
    assert_eq!(diag.range, Range::whole_line(0, 9));
    assert_eq!(diag.description.as_deref(), Some("```\nTraceback: boom\n```"));
}

#[test]
fn test_diagnostic_display() {
    let lines = SourceLines::new("a\nb = 1\n");
    let diag = Diagnostic::new(Severity::Warning, "pkg/a.py", "unused")
        .located(1, Some(4), &lines);
    assert_eq!(diag.to_string(), "pkg/a.py:2:5: warning: unused");

    let diag = Diagnostic::new(Severity::Info, "pkg/a.py", "see here").located(0, None, &lines);
    assert_eq!(diag.to_string(), "pkg/a.py:1: info: see here");
}

#[test]
fn test_highlight_word_stops_at_non_ascii_letter() {
    let lines = SourceLines::new("x = caf\u{e9}_name");
    assert_eq!(
        highlight_range(&lines, 0, Some(4)),
        Range::new(Position::new(0, 4), Position::new(0, 7))
    );
}
