//! JSON Emitter
//!
//! Machine-readable diagnostic output in JSON format.

use std::io::Write;

use crate::Diagnostic;

use super::{escape_json, DiagnosticEmitter};

/// JSON emitter for machine-readable output.
///
/// Produces a single array; call [`JsonEmitter::begin`] before the first
/// diagnostic and [`JsonEmitter::end`] after the last.
pub struct JsonEmitter<W: Write> {
    writer: W,
    first: bool,
}

impl<W: Write> JsonEmitter<W> {
    /// Create a new JSON emitter.
    pub fn new(writer: W) -> Self {
        JsonEmitter {
            writer,
            first: true,
        }
    }

    /// Begin the JSON array output.
    pub fn begin(&mut self) {
        let _ = write!(self.writer, "[");
    }

    /// End the JSON array output.
    pub fn end(&mut self) {
        if self.first {
            let _ = writeln!(self.writer, "]");
        } else {
            let _ = writeln!(self.writer, "\n]");
        }
    }
}

impl<W: Write> DiagnosticEmitter for JsonEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        if self.first {
            let _ = writeln!(self.writer);
        } else {
            let _ = writeln!(self.writer, ",");
        }
        self.first = false;

        // Fixed field order, values escaped with escape_json
        let _ = writeln!(self.writer, "  {{");
        let _ = writeln!(
            self.writer,
            "    \"severity\": \"{}\",",
            diagnostic.severity
        );
        let _ = writeln!(
            self.writer,
            "    \"file\": \"{}\",",
            escape_json(&diagnostic.file_path.to_string_lossy())
        );
        let _ = writeln!(self.writer, "    \"line\": {},", diagnostic.line);
        match diagnostic.column {
            Some(column) => {
                let _ = writeln!(self.writer, "    \"column\": {column},");
            }
            None => {
                let _ = writeln!(self.writer, "    \"column\": null,");
            }
        }
        let range = diagnostic.range;
        let _ = writeln!(
            self.writer,
            "    \"range\": {{\"start\": [{}, {}], \"end\": [{}, {}]}},",
            range.start.line, range.start.character, range.end.line, range.end.character
        );
        match diagnostic.description {
            Some(ref description) => {
                let _ = writeln!(
                    self.writer,
                    "    \"description\": \"{}\",",
                    escape_json(description)
                );
            }
            None => {
                let _ = writeln!(self.writer, "    \"description\": null,");
            }
        }
        let _ = writeln!(
            self.writer,
            "    \"message\": \"{}\"",
            escape_json(&diagnostic.message)
        );
        let _ = write!(self.writer, "  }}");
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, _error_count: usize, _warning_count: usize) {
        // Counts are derivable from the array itself
    }
}
