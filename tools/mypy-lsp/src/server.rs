// mypy LSP server implementation

use std::sync::Arc;

use mypy_config::{ProjectRoots, SettingsStore};
use mypy_diagnostic::SourceLines;
use mypy_invoke::TokioProcessRunner;
use mypy_lint::LintSession;
use serde_json::Value;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

use crate::convert::{file_path, python_file_path, to_lsp_diagnostic};
use crate::document::{DocumentStore, OpenDocument};
use crate::events::{
    configuration_settings, initialization_settings, is_project_config, should_lint,
    touches_project_config, DocumentEvent,
};
use crate::logging::LogControl;
use crate::roots::SharedRoots;

/// Config files whose changes invalidate the config-file lookup cache.
const CONFIG_FILE_GLOB: &str = "**/{mypy.ini,setup.cfg}";

/// mypy Language Server
pub struct MypyLanguageServer {
    client: Client,
    documents: Arc<DocumentStore>,
    roots: Arc<SharedRoots>,
    session: Arc<LintSession>,
    log: LogControl,
}

impl MypyLanguageServer {
    pub fn new(client: Client, log: LogControl) -> Self {
        let roots = Arc::new(SharedRoots::default());
        let session = LintSession::new(
            Arc::new(SettingsStore::default()),
            Arc::new(TokioProcessRunner),
            Arc::clone(&roots) as Arc<dyn ProjectRoots>,
        );
        MypyLanguageServer {
            client,
            documents: Arc::new(DocumentStore::new()),
            roots,
            session: Arc::new(session),
            log,
        }
    }

    /// Lint a document in the background and publish the result.
    ///
    /// Diagnostics are published with the version they were computed for.
    /// Results for a document that changed in the meantime are dropped; the
    /// edit that changed it has scheduled its own lint.
    fn spawn_lint(&self, uri: Url) {
        let Some(path) = python_file_path(&uri) else {
            return;
        };
        let client = self.client.clone();
        let session = Arc::clone(&self.session);
        let document = OpenDocument::new(Arc::clone(&self.documents), uri.clone(), path);

        tokio::spawn(async move {
            let Some(before) = document.snapshot() else {
                return;
            };
            match session.lint(&document).await {
                Ok(Some(diagnostics)) => {
                    if !document.is_unchanged_since(&before) {
                        tracing::debug!(%uri, "dropping diagnostics for outdated text");
                        return;
                    }
                    let version = before.version;
                    let lines = SourceLines::new(before.text);
                    let diagnostics = diagnostics
                        .iter()
                        .map(|diagnostic| to_lsp_diagnostic(diagnostic, &lines))
                        .collect();
                    client.publish_diagnostics(uri, diagnostics, Some(version)).await;
                }
                Ok(None) => {}
                Err(error) => {
                    tracing::warn!(%uri, %error, "lint failed");
                    client
                        .log_message(MessageType::ERROR, format!("mypy-lint: {error}"))
                        .await;
                }
            }
        });
    }

    fn lint_all_open(&self) {
        for uri in self.documents.uris() {
            self.spawn_lint(uri);
        }
    }

    /// Replace the settings with an extracted settings object. Returns
    /// whether they changed.
    async fn apply_settings(&self, value: Value) -> bool {
        match self.session.settings().update_from_json(value) {
            Ok(settings) => {
                self.log.set_debug(settings.debug);
                self.session.resolver().finder().invalidate();
                true
            }
            Err(error) => {
                self.client
                    .log_message(
                        MessageType::WARNING,
                        format!("mypy-lint: keeping previous settings: {error}"),
                    )
                    .await;
                false
            }
        }
    }

    async fn register_config_watcher(&self) {
        let options = DidChangeWatchedFilesRegistrationOptions {
            watchers: vec![FileSystemWatcher {
                glob_pattern: GlobPattern::String(CONFIG_FILE_GLOB.to_string()),
                kind: None,
            }],
        };
        let register_options = match serde_json::to_value(options) {
            Ok(value) => value,
            Err(error) => {
                tracing::warn!(%error, "failed to encode file watcher options");
                return;
            }
        };
        let registration = Registration {
            id: "mypy-lint-config-files".to_string(),
            method: "workspace/didChangeWatchedFiles".to_string(),
            register_options: Some(register_options),
        };
        if let Err(error) = self.client.register_capability(vec![registration]).await {
            tracing::debug!(%error, "client does not support watching config files");
        }
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for MypyLanguageServer {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        let folders = params.workspace_folders.unwrap_or_default();
        if folders.is_empty() {
            #[allow(deprecated, reason = "fallback for clients without workspace folders")]
            let root = params.root_uri.as_ref().and_then(file_path);
            self.roots.replace(root);
        } else {
            self.roots
                .replace(folders.iter().filter_map(|folder| file_path(&folder.uri)));
        }

        if let Some(settings) = params
            .initialization_options
            .as_ref()
            .and_then(initialization_settings)
        {
            self.apply_settings(settings).await;
        }

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Options(
                    TextDocumentSyncOptions {
                        open_close: Some(true),
                        change: Some(TextDocumentSyncKind::FULL),
                        save: Some(TextDocumentSyncSaveOptions::SaveOptions(SaveOptions {
                            include_text: Some(true),
                        })),
                        ..Default::default()
                    },
                )),
                workspace: Some(WorkspaceServerCapabilities {
                    workspace_folders: Some(WorkspaceFoldersServerCapabilities {
                        supported: Some(true),
                        change_notifications: Some(OneOf::Left(true)),
                    }),
                    file_operations: None,
                }),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "mypy-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.register_config_watcher().await;
        self.client
            .log_message(MessageType::INFO, "mypy language server initialized")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let document = params.text_document;
        let Some(path) = python_file_path(&document.uri) else {
            return;
        };
        let saved_text = tokio::fs::read_to_string(&path).await.ok();

        self.documents.open(
            document.uri.clone(),
            document.text,
            document.version,
            saved_text,
        );
        if should_lint(DocumentEvent::Open, &self.session.settings().snapshot()) {
            self.spawn_lint(document.uri);
        }
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        let Some(change) = params.content_changes.into_iter().last() else {
            return;
        };

        if !self
            .documents
            .change(&uri, change.text, params.text_document.version)
        {
            return;
        }

        if should_lint(DocumentEvent::Change, &self.session.settings().snapshot()) {
            self.spawn_lint(uri);
        }
    }

    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        let uri = params.text_document.uri;

        let finder = self.session.resolver().finder();
        if is_project_config(file_path(&uri).as_deref(), finder) {
            finder.invalidate();
            self.lint_all_open();
            return;
        }

        if !self.documents.save(&uri, params.text) {
            return;
        }
        if should_lint(DocumentEvent::Save, &self.session.settings().snapshot()) {
            self.spawn_lint(uri);
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        if self.documents.close(&uri) {
            self.client.publish_diagnostics(uri, Vec::new(), None).await;
        }
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        let Some(settings) = configuration_settings(&params.settings) else {
            return;
        };
        if self.apply_settings(settings).await {
            self.lint_all_open();
        }
    }

    async fn did_change_watched_files(&self, params: DidChangeWatchedFilesParams) {
        let finder = self.session.resolver().finder();
        if touches_project_config(&params.changes, finder) {
            finder.invalidate();
            self.lint_all_open();
        }
    }

    async fn did_change_workspace_folders(&self, params: DidChangeWorkspaceFoldersParams) {
        let added = params
            .event
            .added
            .iter()
            .filter_map(|folder| file_path(&folder.uri))
            .collect();
        let removed: Vec<_> = params
            .event
            .removed
            .iter()
            .filter_map(|folder| file_path(&folder.uri))
            .collect();
        self.roots.update(added, &removed);
    }
}
