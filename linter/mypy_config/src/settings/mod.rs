//! Editor-wide settings.
//!
//! [`Settings`] is an immutable snapshot. The host keeps the current one in a
//! [`SettingsStore`] and swaps in a new snapshot when the user edits settings;
//! a lint run reads one snapshot and uses it throughout.

use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Global settings, keyed in camelCase on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Lint while typing. When off, lint on open and save only.
    pub lint_on_change: bool,
    /// Command used to run mypy, tokenized with shell quoting rules.
    pub mypy_command: String,
    /// Value for `MYPYPATH`. Project config files may prepend to it.
    pub env_mypy_path: String,
    /// Pass `--incremental` with a cache directory.
    pub incremental_mode: bool,
    /// Cache directory for incremental mode. A relative path is created inside
    /// every project; an absolute path gets one subdirectory per project.
    pub incremental_cache_directory: String,
    /// Log debugging information for every lint run.
    pub debug: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            lint_on_change: true,
            mypy_command: "python3 -m mypy".to_string(),
            env_mypy_path: String::new(),
            incremental_mode: false,
            incremental_cache_directory: default_cache_directory()
                .to_string_lossy()
                .into_owned(),
            debug: false,
        }
    }
}

fn default_cache_directory() -> PathBuf {
    std::env::temp_dir().join("mypy-lint")
}

impl Settings {
    /// Wire names of every field.
    pub const KEYS: &'static [&'static str] = &[
        "lintOnChange",
        "mypyCommand",
        "envMypyPath",
        "incrementalMode",
        "incrementalCacheDirectory",
        "debug",
    ];

    /// Whether `value` is a non-empty object holding only settings keys.
    pub fn is_settings_object(value: &serde_json::Value) -> bool {
        value.as_object().is_some_and(|object| {
            !object.is_empty() && object.keys().all(|key| Self::KEYS.contains(&key.as_str()))
        })
    }

    /// Read settings from a JSON object. Missing keys take their defaults;
    /// `null` yields the defaults.
    pub fn from_json(value: serde_json::Value) -> Result<Self, ConfigError> {
        if value.is_null() {
            return Ok(Settings::default());
        }
        Ok(serde_json::from_value(value)?)
    }
}

/// Holder of the current settings snapshot.
#[derive(Debug, Default)]
pub struct SettingsStore {
    current: RwLock<Arc<Settings>>,
}

impl SettingsStore {
    pub fn new(settings: Settings) -> Self {
        SettingsStore {
            current: RwLock::new(Arc::new(settings)),
        }
    }

    /// The current snapshot. Later updates do not affect it.
    pub fn snapshot(&self) -> Arc<Settings> {
        Arc::clone(&self.current.read())
    }

    pub fn replace(&self, settings: Settings) {
        *self.current.write() = Arc::new(settings);
    }

    /// Replace the snapshot from a JSON object. On error the current
    /// snapshot is left untouched.
    pub fn update_from_json(&self, value: serde_json::Value) -> Result<Arc<Settings>, ConfigError> {
        let settings = Arc::new(Settings::from_json(value)?);
        *self.current.write() = Arc::clone(&settings);
        Ok(settings)
    }
}
