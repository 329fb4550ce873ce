//! Workspace folders, updated as the client adds and removes them.

use std::path::{Path, PathBuf};

use mypy_config::{ProjectRoots, WorkspaceRoots};
use parking_lot::RwLock;

#[derive(Debug, Default)]
pub struct SharedRoots {
    roots: RwLock<WorkspaceRoots>,
}

impl SharedRoots {
    pub fn replace(&self, roots: impl IntoIterator<Item = PathBuf>) {
        *self.roots.write() = WorkspaceRoots::new(roots);
    }

    pub fn update(&self, added: Vec<PathBuf>, removed: &[PathBuf]) {
        let mut roots = self.roots.write();
        let mut kept: Vec<PathBuf> = roots
            .roots()
            .iter()
            .filter(|root| !removed.contains(root) && !added.contains(root))
            .cloned()
            .collect();
        kept.extend(added);
        *roots = WorkspaceRoots::new(kept);
    }
}

impl ProjectRoots for SharedRoots {
    fn root_for(&self, file_path: &Path) -> Option<PathBuf> {
        self.roots.read().root_for(file_path)
    }
}
