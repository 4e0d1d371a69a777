//! Source file entity - a path and its modification time at observation

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::domain::ports::{FileSystem, FsResult};

/// A source file as observed on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    path: PathBuf,
    modified: Option<SystemTime>,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>, modified: Option<SystemTime>) -> Self {
        Self {
            path: path.into(),
            modified,
        }
    }

    /// Stat `path` through the file system port
    pub fn observe<F: FileSystem + ?Sized>(fs: &F, path: &Path) -> FsResult<Self> {
        Ok(Self::new(path, fs.modified(path)?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn modified(&self) -> Option<SystemTime> {
        self.modified
    }

    pub fn exists(&self) -> bool {
        self.modified.is_some()
    }

    /// Strictly newer than `time` (equal mtimes are up to date, as in make)
    pub fn is_newer_than(&self, time: SystemTime) -> bool {
        self.modified.is_some_and(|m| m > time)
    }
}
