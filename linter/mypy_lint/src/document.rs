//! Documents as seen by a lint request.

use std::path::{Path, PathBuf};

/// An editor buffer, read at two points of a lint request: when it starts and
/// when mypy has finished.
pub trait Document: Send + Sync {
    /// On-disk location. `None` for untitled buffers, which are never linted.
    fn path(&self) -> Option<&Path>;

    /// Current content.
    fn text(&self) -> String;

    /// Whether the content differs from the file on disk.
    fn is_modified(&self) -> bool;

    /// Whether the buffer is still open.
    fn is_alive(&self) -> bool;
}

/// A buffer whose content does not change, such as a file read by the CLI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BufferDocument {
    path: Option<PathBuf>,
    text: String,
    saved_text: Option<String>,
}

impl BufferDocument {
    /// A buffer identical to the file on disk.
    pub fn saved(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        let text = text.into();
        BufferDocument {
            path: Some(path.into()),
            saved_text: Some(text.clone()),
            text,
        }
    }

    /// A buffer that may differ from disk. `saved_text` is `None` when the
    /// file does not exist or could not be read.
    pub fn edited(
        path: impl Into<PathBuf>,
        text: impl Into<String>,
        saved_text: Option<String>,
    ) -> Self {
        BufferDocument {
            path: Some(path.into()),
            text: text.into(),
            saved_text,
        }
    }

    /// A buffer that has never been saved.
    pub fn untitled(text: impl Into<String>) -> Self {
        BufferDocument {
            path: None,
            text: text.into(),
            saved_text: None,
        }
    }
}

impl Document for BufferDocument {
    fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn text(&self) -> String {
        self.text.clone()
    }

    fn is_modified(&self) -> bool {
        self.saved_text.as_deref() != Some(self.text.as_str())
    }

    fn is_alive(&self) -> bool {
        true
    }
}
