//! INI parsing for `mypy.ini` and `setup.cfg`.
//!
//! Follows the subset of Python's `configparser` dialect that mypy config
//! files use, so values read here agree with what mypy itself sees:
//!
//! - `[section]` headers; keys before any header go to the unnamed section `""`
//! - `key = value` or `key: value`, split at the first delimiter
//! - keys are case-insensitive (stored lower-cased), values are trimmed
//! - `#` and `;` start full-line comments
//! - indented lines continue the previous value, joined with `\n`
//! - a bare `key` means `true`
//!
//! Malformed lines are skipped; a broken project config never fails a lint.

use rustc_hash::FxHashMap;

/// Key/value pairs of one section.
pub type IniSection = FxHashMap<String, String>;

/// Parsed INI file: section name → key → value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IniDocument {
    sections: FxHashMap<String, IniSection>,
}

impl IniDocument {
    pub fn parse(text: &str) -> Self {
        let mut sections: FxHashMap<String, IniSection> = FxHashMap::default();
        let mut current = String::new();
        // Key whose value an indented line would continue
        let mut open_key: Option<String> = None;

        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                open_key = None;
                continue;
            }
            if line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if raw.starts_with([' ', '\t']) {
                if let Some(ref key) = open_key {
                    if let Some(value) = sections.get_mut(&current).and_then(|s| s.get_mut(key)) {
                        value.push('\n');
                        value.push_str(line);
                        continue;
                    }
                }
            }

            if let Some(header) = line.strip_prefix('[') {
                open_key = None;
                match header.strip_suffix(']') {
                    Some(name) => {
                        current = name.trim().to_string();
                        sections.entry(current.clone()).or_default();
                    }
                    None => {
                        tracing::debug!(line = index + 1, "skipping malformed section header");
                    }
                }
                continue;
            }

            let (key, value) = match line.find(['=', ':']) {
                Some(at) => (line[..at].trim_end(), line[at + 1..].trim_start()),
                None => (line, "true"),
            };
            if key.is_empty() {
                tracing::debug!(line = index + 1, "skipping entry without a key");
                open_key = None;
                continue;
            }

            let key = key.to_lowercase();
            sections
                .entry(current.clone())
                .or_default()
                .insert(key.clone(), value.to_string());
            open_key = Some(key);
        }

        IniDocument { sections }
    }

    pub fn section(&self, name: &str) -> Option<&IniSection> {
        self.sections.get(name)
    }

    /// Value of `key` in `section`. `key` must be lower-case.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.section(section)?.get(key).map(String::as_str)
    }

    pub fn has_key(&self, section: &str, key: &str) -> bool {
        self.get(section, key).is_some()
    }
}
