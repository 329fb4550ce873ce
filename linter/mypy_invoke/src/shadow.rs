//! Temporary copies of unsaved buffers.

use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A file holding unsaved editor content, in its own temporary directory.
///
/// The file keeps the real file's base name so mypy's messages and module
/// name inference match the real file. Dropping the value removes the file
/// and its directory; [`ShadowFile::close`] does the same and reports errors.
#[derive(Debug)]
pub struct ShadowFile {
    dir: TempDir,
    path: PathBuf,
}

impl ShadowFile {
    pub async fn create(base_name: &OsStr, content: &str) -> io::Result<Self> {
        let dir = tempfile::Builder::new().prefix("mypy-lint-").tempdir()?;
        let path = dir.path().join(base_name);
        tokio::fs::write(&path, content).await?;
        Ok(ShadowFile { dir, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn close(self) -> io::Result<()> {
        self.dir.close()
    }
}
