//! Project-root resolution.

use std::path::{Path, PathBuf};

/// Maps a file to the project root that encloses it.
pub trait ProjectRoots: Send + Sync {
    fn root_for(&self, file_path: &Path) -> Option<PathBuf>;
}

/// A fixed set of project roots, such as the folders open in an editor.
///
/// With nested roots, the innermost one containing the file wins.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorkspaceRoots {
    roots: Vec<PathBuf>,
}

impl WorkspaceRoots {
    pub fn new(roots: impl IntoIterator<Item = PathBuf>) -> Self {
        WorkspaceRoots {
            roots: roots.into_iter().collect(),
        }
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }
}

impl ProjectRoots for WorkspaceRoots {
    fn root_for(&self, file_path: &Path) -> Option<PathBuf> {
        self.roots
            .iter()
            .filter(|root| file_path != root.as_path() && file_path.starts_with(root))
            .max_by_key(|root| root.components().count())
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_for_innermost() {
        let roots = WorkspaceRoots::new([PathBuf::from("/work"), PathBuf::from("/work/inner")]);
        assert_eq!(
            roots.root_for(Path::new("/work/inner/a.py")),
            Some(PathBuf::from("/work/inner"))
        );
        assert_eq!(
            roots.root_for(Path::new("/work/b.py")),
            Some(PathBuf::from("/work"))
        );
    }

    #[test]
    fn test_root_for_outside() {
        let roots = WorkspaceRoots::new([PathBuf::from("/work")]);
        assert_eq!(roots.root_for(Path::new("/workspace/a.py")), None);
        assert_eq!(WorkspaceRoots::default().root_for(Path::new("/a.py")), None);
    }
}
