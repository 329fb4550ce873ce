//! What the server does for each client notification.

use std::path::Path;

use mypy_config::{ConfigFinder, Settings};
use serde_json::Value;
use tower_lsp::lsp_types::FileEvent;

use crate::convert::file_path;

/// Key of this server's settings inside initialization options and
/// `workspace/didChangeConfiguration` payloads.
pub const SETTINGS_SECTION: &str = "mypyLint";

/// Settings carried by a `workspace/didChangeConfiguration` payload.
///
/// Payloads without a `mypyLint` section belong to other extensions and
/// carry none.
pub fn configuration_settings(payload: &Value) -> Option<Value> {
    payload
        .get(SETTINGS_SECTION)
        .filter(|section| !section.is_null())
        .cloned()
}

/// Settings carried by `initializationOptions`: the `mypyLint` section, or
/// the options object itself when it holds nothing but settings keys.
pub fn initialization_settings(options: &Value) -> Option<Value> {
    configuration_settings(options)
        .or_else(|| Settings::is_settings_object(options).then(|| options.clone()))
}

/// Text document notifications that may trigger a lint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentEvent {
    Open,
    Change,
    Save,
}

pub fn should_lint(event: DocumentEvent, settings: &Settings) -> bool {
    match event {
        DocumentEvent::Open | DocumentEvent::Save => true,
        DocumentEvent::Change => settings.lint_on_change,
    }
}

/// Whether `path` is a project config file, whose changes invalidate the
/// config-file lookup and every open document's result.
pub fn is_project_config(path: Option<&Path>, finder: &ConfigFinder) -> bool {
    path.is_some_and(|path| finder.is_config_file(path))
}

/// Whether any watched-file event concerns a project config file.
pub fn touches_project_config(changes: &[FileEvent], finder: &ConfigFinder) -> bool {
    changes
        .iter()
        .any(|change| is_project_config(file_path(&change.uri).as_deref(), finder))
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use mypy_config::SettingsStore;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tower_lsp::lsp_types::{FileChangeType, Url};

    use super::*;

    fn event(uri: &str) -> FileEvent {
        FileEvent {
            uri: Url::parse(uri).unwrap(),
            typ: FileChangeType::CHANGED,
        }
    }

    #[test]
    fn test_configuration_settings_takes_own_section() {
        let payload = json!({
            "mypyLint": { "mypyCommand": "mypy --strict" },
            "python": { "analysis": {} }
        });
        assert_eq!(
            configuration_settings(&payload),
            Some(json!({ "mypyCommand": "mypy --strict" }))
        );
    }

    #[test]
    fn test_configuration_settings_ignores_other_sections() {
        assert_eq!(configuration_settings(&json!({ "python": { "analysis": {} } })), None);
        assert_eq!(configuration_settings(&json!({ "mypyLint": null })), None);
        assert_eq!(configuration_settings(&Value::Null), None);
        assert_eq!(configuration_settings(&json!({ "mypyCommand": "mypy" })), None);
    }

    #[test]
    fn test_foreign_configuration_keeps_user_settings() {
        let store = SettingsStore::new(Settings {
            mypy_command: "custom-mypy".to_string(),
            ..Settings::default()
        });

        for payload in [json!({ "python": { "analysis": {} } }), Value::Null] {
            if let Some(settings) = configuration_settings(&payload) {
                store.update_from_json(settings).unwrap();
            }
        }

        assert_eq!(store.snapshot().mypy_command, "custom-mypy");
    }

    #[test]
    fn test_initialization_settings() {
        assert_eq!(
            initialization_settings(&json!({ "mypyLint": { "debug": true } })),
            Some(json!({ "debug": true }))
        );
        assert_eq!(
            initialization_settings(&json!({ "lintOnChange": false })),
            Some(json!({ "lintOnChange": false }))
        );
        assert_eq!(initialization_settings(&json!({ "python": {} })), None);
        assert_eq!(initialization_settings(&json!({})), None);
        assert_eq!(initialization_settings(&Value::Null), None);
    }

    #[test]
    fn test_should_lint_honors_lint_on_change() {
        let eager = Settings::default();
        let lazy = Settings {
            lint_on_change: false,
            ..Settings::default()
        };

        assert!(should_lint(DocumentEvent::Change, &eager));
        assert!(!should_lint(DocumentEvent::Change, &lazy));
        assert!(should_lint(DocumentEvent::Open, &lazy));
        assert!(should_lint(DocumentEvent::Save, &lazy));
    }

    #[test]
    fn test_is_project_config() {
        let finder = ConfigFinder::default();
        assert!(is_project_config(Some(Path::new("/w/mypy.ini")), &finder));
        assert!(is_project_config(Some(Path::new("/w/pkg/setup.cfg")), &finder));
        assert!(!is_project_config(Some(Path::new("/w/a.py")), &finder));
        assert!(!is_project_config(None, &finder));
    }

    #[test]
    fn test_touches_project_config() {
        let finder = ConfigFinder::default();
        assert!(touches_project_config(
            &[event("file:///w/a.py"), event("file:///w/mypy.ini")],
            &finder
        ));
        assert!(!touches_project_config(&[event("file:///w/a.py")], &finder));
        assert!(!touches_project_config(&[], &finder));
    }
}
