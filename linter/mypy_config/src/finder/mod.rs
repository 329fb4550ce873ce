//! Locating the project config file.

use std::path::{Path, PathBuf};

use dashmap::DashMap;

/// Config file names, in lookup order within one directory.
pub const CONFIG_FILE_NAMES: &[&str] = &["mypy.ini", "setup.cfg"];

/// Finds the nearest config file above a directory.
///
/// Results are cached per start directory. The cache does not watch the file
/// system; call [`ConfigFinder::invalidate`] when config files may have been
/// created, moved or deleted.
#[derive(Debug)]
pub struct ConfigFinder {
    names: &'static [&'static str],
    cache: DashMap<PathBuf, Option<PathBuf>>,
}

impl Default for ConfigFinder {
    fn default() -> Self {
        Self::new(CONFIG_FILE_NAMES)
    }
}

impl ConfigFinder {
    pub fn new(names: &'static [&'static str]) -> Self {
        ConfigFinder {
            names,
            cache: DashMap::new(),
        }
    }

    /// Walk from `start_dir` towards the root; the first directory holding
    /// any of the candidate names wins.
    pub async fn find_nearest(&self, start_dir: &Path) -> Option<PathBuf> {
        if let Some(hit) = self.cache.get(start_dir) {
            return hit.value().clone();
        }

        let found = self.search(start_dir).await;
        self.cache.insert(start_dir.to_path_buf(), found.clone());
        found
    }

    async fn search(&self, start_dir: &Path) -> Option<PathBuf> {
        for dir in start_dir.ancestors() {
            for name in self.names {
                let candidate = dir.join(name);
                if is_file(&candidate).await {
                    return Some(candidate);
                }
            }
        }
        None
    }

    pub fn invalidate(&self) {
        self.cache.clear();
    }

    /// Whether `path` has one of the candidate config file names.
    pub fn is_config_file(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| self.names.contains(&name))
    }
}

async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .is_ok_and(|meta| meta.is_file())
}
