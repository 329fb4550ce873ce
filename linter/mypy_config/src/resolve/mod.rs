//! Effective configuration for one lint run.

use std::path::{Path, PathBuf};

use md5::{Digest, Md5};

use crate::{parse_command, ConfigError, ConfigFinder, IniDocument, ProjectRoots, Settings};

/// Project config section owned by this linter.
pub const PLUGIN_SECTION: &str = "mypy_lint";
/// Key in [`PLUGIN_SECTION`] whose value is prepended to `MYPYPATH`.
pub const PLUGIN_MYPYPATH_KEY: &str = "mypypath";
/// mypy's own config section.
pub const CHECKER_SECTION: &str = "mypy";
/// Key in [`CHECKER_SECTION`] that hands incremental mode over to the project.
pub const INCREMENTAL_KEY: &str = "incremental";

/// Separator for search-path lists such as `MYPYPATH`.
#[cfg(not(windows))]
pub const SEARCH_PATH_SEPARATOR: char = ':';
#[cfg(windows)]
pub const SEARCH_PATH_SEPARATOR: char = ';';

/// Settings merged with project overrides.
///
/// Invariant: the command always has at least one word, the executable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EffectiveConfig {
    command: Vec<String>,
    /// Value for `MYPYPATH`; possibly empty.
    pub extra_env_path: String,
    pub incremental: bool,
    pub cache_directory_template: String,
    /// The project config file that was applied, if any.
    pub config_file: Option<PathBuf>,
}

impl EffectiveConfig {
    /// Start from the global settings alone.
    pub fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        Ok(EffectiveConfig {
            command: parse_command(&settings.mypy_command)?,
            extra_env_path: settings.env_mypy_path.clone(),
            incremental: settings.incremental_mode,
            cache_directory_template: settings.incremental_cache_directory.clone(),
            config_file: None,
        })
    }

    pub fn executable(&self) -> &str {
        &self.command[0]
    }

    /// Arguments that follow the executable in the command setting.
    pub fn base_args(&self) -> &[String] {
        &self.command[1..]
    }

    pub fn command(&self) -> &[String] {
        &self.command
    }

    /// Apply overrides from the project config file at `path`.
    pub fn apply_project_config(&mut self, path: PathBuf, doc: &IniDocument) {
        if let Some(project_path) = doc.get(PLUGIN_SECTION, PLUGIN_MYPYPATH_KEY) {
            self.extra_env_path = if self.extra_env_path.is_empty() {
                project_path.to_string()
            } else {
                format!("{project_path}{SEARCH_PATH_SEPARATOR}{}", self.extra_env_path)
            };
        }

        // A project that configures incremental mode itself keeps control of it
        if doc.has_key(CHECKER_SECTION, INCREMENTAL_KEY) {
            self.incremental = false;
        }

        self.config_file = Some(path);
    }
}

/// Resolves [`EffectiveConfig`] for files, one request at a time.
#[derive(Debug, Default)]
pub struct ConfigResolver {
    finder: ConfigFinder,
}

impl ConfigResolver {
    pub fn new(finder: ConfigFinder) -> Self {
        ConfigResolver { finder }
    }

    pub fn finder(&self) -> &ConfigFinder {
        &self.finder
    }

    /// Merge `settings` with the config file nearest to `file_path`.
    pub async fn resolve(
        &self,
        settings: &Settings,
        file_path: &Path,
    ) -> Result<EffectiveConfig, ConfigError> {
        let mut config = EffectiveConfig::from_settings(settings)?;

        let start_dir = file_path.parent().unwrap_or(file_path);
        if let Some(path) = self.finder.find_nearest(start_dir).await {
            let text = tokio::fs::read_to_string(&path)
                .await
                .map_err(|source| ConfigError::Read {
                    path: path.clone(),
                    source,
                })?;
            tracing::debug!(config_file = %path.display(), "applying project config");
            config.apply_project_config(path, &IniDocument::parse(&text));
        }

        Ok(config)
    }
}

/// Directory to run mypy from.
///
/// In order: the config file's directory, the enclosing project root, the
/// file's own directory. mypy resolves its config and relative paths from
/// here, so an explicit project config always wins.
pub fn choose_working_directory(
    config: &EffectiveConfig,
    file_path: &Path,
    roots: &dyn ProjectRoots,
) -> PathBuf {
    if let Some(dir) = config.config_file.as_deref().and_then(Path::parent) {
        return dir.to_path_buf();
    }
    if let Some(root) = roots.root_for(file_path) {
        return root;
    }
    file_path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

/// Cache directory for incremental mode.
///
/// An absolute template is shared by all projects, so each project gets its
/// own [`project_cache_subdirectory`] inside it. A relative template is
/// returned as is and lands inside the working directory.
pub fn choose_cache_directory(
    config: &EffectiveConfig,
    working_directory: &Path,
) -> Result<PathBuf, ConfigError> {
    if config.cache_directory_template.is_empty() {
        return Err(ConfigError::EmptyCacheDirectory);
    }

    let template = Path::new(&config.cache_directory_template);
    if template.is_absolute() {
        Ok(template.join(project_cache_subdirectory(working_directory)))
    } else {
        Ok(template.to_path_buf())
    }
}

/// `<basename>-<md5 hex of the full path>`: readable, and distinct for
/// projects that share a basename.
pub fn project_cache_subdirectory(working_directory: &Path) -> String {
    let full = working_directory.to_string_lossy();
    let digest = Md5::digest(full.as_bytes());
    let basename = working_directory
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();
    format!("{basename}-{}", hex::encode(digest))
}

#[cfg(test)]
mod tests;
