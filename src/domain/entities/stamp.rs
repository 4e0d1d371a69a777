//! Stamp entity
//!
//! A stamp's content is irrelevant; its mtime is the time of the last
//! successful check of its unit.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use super::SourceFile;
use crate::domain::ports::{FileSystem, FsResult};

/// Success marker for a check unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stamp {
    path: PathBuf,
    modified: Option<SystemTime>,
}

impl Stamp {
    pub fn new(path: impl Into<PathBuf>, modified: Option<SystemTime>) -> Self {
        Self {
            path: path.into(),
            modified,
        }
    }

    pub fn load<F: FileSystem + ?Sized>(fs: &F, path: &Path) -> FsResult<Self> {
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

    /// True when `file` was modified after this stamp was last touched.
    ///
    /// A missing stamp is older than everything; a missing file is never
    /// newer than an existing stamp.
    pub fn is_older_than(&self, file: &SourceFile) -> bool {
        match self.modified {
            None => true,
            Some(stamped) => file.is_newer_than(stamped),
        }
    }
}
