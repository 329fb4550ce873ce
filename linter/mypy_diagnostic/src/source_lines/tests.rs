use super::*;

#[test]
fn test_empty_buffer_has_one_line() {
    let lines = SourceLines::new("");
    assert_eq!(lines.line_count(), 1);
    assert_eq!(lines.line_text(0), Some(""));
    assert_eq!(lines.line_len(0), Some(0));
}

#[test]
fn test_line_text_strips_terminators() {
    let lines = SourceLines::new("a = 1\r\nbb = 2\nccc");
    assert_eq!(lines.line_count(), 3);
    assert_eq!(lines.line_text(0), Some("a = 1"));
    assert_eq!(lines.line_text(1), Some("bb = 2"));
    assert_eq!(lines.line_text(2), Some("ccc"));
    assert_eq!(lines.line_text(3), None);
}

#[test]
fn test_line_len_counts_characters() {
    let lines = SourceLines::new("s = 'héllo'\n");
    assert_eq!(lines.line_len(0), Some(11));
}

#[test]
fn test_trailing_newline_adds_empty_line() {
    let lines = SourceLines::new("x\n");
    assert_eq!(lines.line_count(), 2);
    assert_eq!(lines.line_len(1), Some(0));
}
