//! Open text documents.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashmap::DashMap;
use mypy_lint::Document;
use tower_lsp::lsp_types::Url;

/// Document state tracked by the server.
#[derive(Clone, Debug, PartialEq, Eq)]
struct DocumentState {
    pub text: String,
    pub version: i32,
    /// Content of the file on disk, as of open or the last save.
    pub saved_text: Option<String>,
}

/// Text and version of a document at one moment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub text: String,
    pub version: i32,
}

/// Documents the client has open, keyed by URI.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: DashMap<Url, DocumentState>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&self, uri: Url, text: String, version: i32, saved_text: Option<String>) {
        self.documents.insert(
            uri,
            DocumentState {
                text,
                version,
                saved_text,
            },
        );
    }

    /// Replace the text of an open document. Returns `false` for unknown URIs.
    pub fn change(&self, uri: &Url, text: String, version: i32) -> bool {
        let Some(mut state) = self.documents.get_mut(uri) else {
            return false;
        };
        state.text = text;
        state.version = version;
        true
    }

    /// Record a save. `text` is the saved content when the client sends it.
    /// Returns `false` for unknown URIs.
    pub fn save(&self, uri: &Url, text: Option<String>) -> bool {
        let Some(mut state) = self.documents.get_mut(uri) else {
            return false;
        };
        if let Some(text) = text {
            state.text = text;
        }
        state.saved_text = Some(state.text.clone());
        true
    }

    /// Forget a document. Returns whether it was open, in which case its
    /// published diagnostics should be cleared.
    pub fn close(&self, uri: &Url) -> bool {
        self.documents.remove(uri).is_some()
    }

    pub fn uris(&self) -> Vec<Url> {
        self.documents.iter().map(|entry| entry.key().clone()).collect()
    }

    pub fn snapshot(&self, uri: &Url) -> Option<Snapshot> {
        self.documents.get(uri).map(|state| Snapshot {
            text: state.text.clone(),
            version: state.version,
        })
    }

    fn with_state<T>(&self, uri: &Url, f: impl FnOnce(&DocumentState) -> T) -> Option<T> {
        self.documents.get(uri).map(|state| f(state.value()))
    }
}

/// View of one entry of the document store.
///
/// Every accessor reads the store afresh, so a lint request sees edits and
/// closes that happen while mypy runs.
pub struct OpenDocument {
    documents: Arc<DocumentStore>,
    uri: Url,
    path: PathBuf,
}

impl OpenDocument {
    pub fn new(documents: Arc<DocumentStore>, uri: Url, path: PathBuf) -> Self {
        OpenDocument {
            documents,
            uri,
            path,
        }
    }

    /// Current text and version, if the document is still open.
    pub fn snapshot(&self) -> Option<Snapshot> {
        self.documents.snapshot(&self.uri)
    }

    /// Whether the document is open with exactly the text and version of
    /// `earlier`.
    pub fn is_unchanged_since(&self, earlier: &Snapshot) -> bool {
        self.snapshot().as_ref() == Some(earlier)
    }
}

impl Document for OpenDocument {
    fn path(&self) -> Option<&Path> {
        Some(&self.path)
    }

    fn text(&self) -> String {
        self.documents
            .with_state(&self.uri, |state| state.text.clone())
            .unwrap_or_default()
    }

    fn is_modified(&self) -> bool {
        self.documents
            .with_state(&self.uri, |state| {
                state.saved_text.as_deref() != Some(state.text.as_str())
            })
            .unwrap_or(false)
    }

    fn is_alive(&self) -> bool {
        self.documents.documents.contains_key(&self.uri)
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn uri() -> Url {
        Url::parse("file:///w/a.py").unwrap()
    }

    fn open(text: &str, saved_text: Option<&str>) -> (Arc<DocumentStore>, OpenDocument) {
        let documents = Arc::new(DocumentStore::new());
        documents.open(uri(), text.to_string(), 1, saved_text.map(str::to_string));
        let doc = OpenDocument::new(Arc::clone(&documents), uri(), PathBuf::from("/w/a.py"));
        (documents, doc)
    }

    #[test]
    fn test_open_document_tracks_edits() {
        let (documents, doc) = open("x = 1\n", Some("x = 1\n"));
        assert!(!doc.is_modified());

        assert!(documents.change(&uri(), "x = 1\ny = 2\n".to_string(), 2));

        assert!(doc.is_modified());
        assert_eq!(doc.text(), "x = 1\ny = 2\n");
        assert_eq!(doc.snapshot().unwrap().version, 2);
    }

    #[test]
    fn test_save_marks_text_as_saved() {
        let (documents, doc) = open("x = 1\n", Some("x = 1\n"));
        documents.change(&uri(), "x = 2\n".to_string(), 2);
        assert!(doc.is_modified());

        assert!(documents.save(&uri(), None));
        assert!(!doc.is_modified());

        assert!(documents.save(&uri(), Some("x = 3\n".to_string())));
        assert_eq!(doc.text(), "x = 3\n");
        assert!(!doc.is_modified());
    }

    #[test]
    fn test_change_and_save_of_unknown_document() {
        let documents = DocumentStore::new();
        assert!(!documents.change(&uri(), "x".to_string(), 1));
        assert!(!documents.save(&uri(), None));
        assert_eq!(documents.snapshot(&uri()), None);
    }

    #[test]
    fn test_close_reports_whether_document_was_open() {
        let (documents, doc) = open("x = 1\n", None);
        assert!(doc.is_modified());
        assert!(doc.is_alive());

        assert!(documents.close(&uri()));
        assert!(!documents.close(&uri()));

        assert!(!doc.is_alive());
        assert_eq!(doc.text(), "");
        assert_eq!(doc.snapshot(), None);
        assert!(documents.uris().is_empty());
    }

    #[test]
    fn test_snapshot_goes_stale_on_edit() {
        let (documents, doc) = open("x = 1\n", None);
        let before = doc.snapshot().unwrap();
        assert!(doc.is_unchanged_since(&before));

        documents.change(&uri(), "x = 1\nx.\n".to_string(), 2);
        assert!(!doc.is_unchanged_since(&before));

        // Same text under a newer version is still a different snapshot
        documents.change(&uri(), "x = 1\n".to_string(), 3);
        assert!(!doc.is_unchanged_since(&before));
    }

    #[test]
    fn test_snapshot_goes_stale_on_close() {
        let (documents, doc) = open("x = 1\n", None);
        let before = doc.snapshot().unwrap();

        documents.close(&uri());

        assert!(!doc.is_unchanged_since(&before));
    }
}
