//! Line lookup over a buffer snapshot.
//!
//! [`SourceLines`] pre-computes line start offsets once so that every report
//! line can look up its source line in O(1) while clamping positions.

/// Read access to the lines of a buffer, without line terminators.
pub trait LineLookup {
    /// Number of lines. A buffer always has at least one (possibly empty) line.
    fn line_count(&self) -> u32;

    /// Text of a 0-based line, without its `\n` or `\r\n` terminator.
    fn line_text(&self, line: u32) -> Option<&str>;

    /// Length of a 0-based line in characters.
    fn line_len(&self, line: u32) -> Option<u32> {
        self.line_text(line)
            .map(|text| u32::try_from(text.chars().count()).unwrap_or(u32::MAX))
    }
}

/// Owned snapshot of a buffer with pre-computed line offsets.
///
/// ```
/// use mypy_diagnostic::{LineLookup, SourceLines};
///
/// let lines = SourceLines::new("one\r\ntwo\n");
/// assert_eq!(lines.line_count(), 3);
/// assert_eq!(lines.line_text(0), Some("one"));
/// assert_eq!(lines.line_text(2), Some(""));
/// ```
#[derive(Clone, Debug, Default)]
pub struct SourceLines {
    text: String,
    /// Byte offset of each line start.
    /// offsets[0] = 0, offsets[1] = byte after the first `\n`, etc.
    offsets: Vec<usize>,
}

impl SourceLines {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let mut offsets = vec![0];
        for (i, byte) in text.as_bytes().iter().enumerate() {
            if *byte == b'\n' {
                offsets.push(i + 1);
            }
        }
        SourceLines { text, offsets }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl LineLookup for SourceLines {
    fn line_count(&self) -> u32 {
        u32::try_from(self.offsets.len()).unwrap_or(u32::MAX)
    }

    fn line_text(&self, line: u32) -> Option<&str> {
        let idx = line as usize;
        let start = *self.offsets.get(idx)?;
        let end = match self.offsets.get(idx + 1) {
            // Drop the '\n' that ends this line
            Some(next) => next - 1,
            None => self.text.len(),
        };
        let raw = &self.text[start..end];
        Some(raw.strip_suffix('\r').unwrap_or(raw))
    }
}

#[cfg(test)]
mod tests;
