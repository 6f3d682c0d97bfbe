//! Common test utilities for integration tests.
//!
//! [`LinkTree`] builds small directory trees with symlinks in a temporary
//! directory that is removed when the fixture is dropped.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary directory tree of files, directories and symlinks.
///
/// `root()` is already canonical, so expected paths built from it compare
/// equal to what the resolver returns even when the system temp directory
/// sits behind a symlink.
#[allow(dead_code)]
pub struct LinkTree {
    _temp: TempDir,
    root: PathBuf,
}

#[allow(dead_code)]
impl LinkTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        let temp = tempfile::tempdir().unwrap();
        let root = fs::canonicalize(temp.path()).unwrap();
        Self { _temp: temp, root }
    }

    /// The canonical root of the tree.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of `relative` inside the tree.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// Creates a directory (and its parents).
    pub fn dir(&self, relative: &str) -> PathBuf {
        let path = self.path(relative);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Creates a file with the given contents, creating parent directories.
    pub fn file_with(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, contents).unwrap();
        path
    }

    /// Creates an empty file.
    pub fn file(&self, relative: &str) -> PathBuf {
        self.file_with(relative, "")
    }

    /// Creates a symlink at `relative` whose target is `target`, verbatim.
    #[cfg(unix)]
    pub fn link(&self, relative: &str, target: impl AsRef<Path>) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        std::os::unix::fs::symlink(target, &path).unwrap();
        path
    }
}
