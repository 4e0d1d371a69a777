//! Local File System Implementation
//!
//! Implements the FileSystem port for local disk operations.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::time::SystemTime;

use crate::domain::ports::file_system::{FileSystem, FsError, FsResult};
use crate::domain::value_objects::parent_dir;

/// Local file system implementation
///
/// Writes go through a temp file in the destination directory followed by
/// a rename, so make never includes a half-written record.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    /// Create a new LocalFs instance
    pub fn new() -> Self {
        Self
    }

    fn ensure_parent(path: &Path) -> FsResult<()> {
        let parent = parent_dir(path);
        fs::create_dir_all(&parent).map_err(|e| FsError::at(&parent, e))
    }
}

impl FileSystem for LocalFs {
    fn modified(&self, path: &Path) -> FsResult<Option<SystemTime>> {
        match fs::metadata(path) {
            Ok(meta) => meta.modified().map(Some).map_err(|e| FsError::at(path, e)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(FsError::at(path, e)),
        }
    }

    fn read(&self, path: &Path) -> FsResult<String> {
        fs::read_to_string(path).map_err(|e| FsError::at(path, e))
    }

    fn write_atomic(&self, path: &Path, content: &str) -> FsResult<()> {
        Self::ensure_parent(path)?;

        let dir = parent_dir(path);
        let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(|e| FsError::at(&dir, e))?;
        tmp.write_all(content.as_bytes())
            .map_err(|e| FsError::at(tmp.path(), e))?;
        tmp.persist(path).map_err(|e| FsError::at(path, e.error))?;
        Ok(())
    }

    fn touch(&self, path: &Path, time: SystemTime) -> FsResult<()> {
        Self::ensure_parent(path)?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| FsError::at(path, e))?;
        file.set_modified(time).map_err(|e| FsError::at(path, e))
    }

    fn clock(&self, dir: &Path) -> FsResult<SystemTime> {
        let sample = tempfile::NamedTempFile::new_in(dir).map_err(|e| FsError::at(dir, e))?;
        sample
            .as_file()
            .metadata()
            .and_then(|meta| meta.modified())
            .map_err(|e| FsError::at(sample.path(), e))
    }

    fn create_dir_all(&self, path: &Path) -> FsResult<()> {
        fs::create_dir_all(path).map_err(|e| FsError::at(path, e))
    }

    fn rename(&self, from: &Path, to: &Path) -> FsResult<()> {
        fs::rename(from, to).map_err(|e| FsError::at(to, e))
    }

    fn remove_file(&self, path: &Path) -> FsResult<()> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(FsError::at(path, e)),
        }
    }
}
