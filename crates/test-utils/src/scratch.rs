//! Scratch directories for tests that need real files on disk.

use std::fs;
use std::path::{Path, PathBuf};

/// A scratch directory that is removed when dropped.
///
/// ```
/// use test_utils::TempWorkspace;
///
/// let ws = TempWorkspace::new();
/// let path = ws.write("a.txt", "obs fcst\n1 2\n");
/// assert!(path.exists());
/// ```
pub struct TempWorkspace {
    dir: tempfile::TempDir,
}

impl TempWorkspace {
    pub fn new() -> Self {
        let dir = tempfile::Builder::new()
            .prefix("verif_test_")
            .tempdir()
            .expect("Failed to create temporary test directory");
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Path of `name` inside the workspace. The file need not exist.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write `contents` to `name` and return its path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, contents).expect("Failed to write test file");
        path
    }
}

impl Default for TempWorkspace {
    fn default() -> Self {
        Self::new()
    }
}
