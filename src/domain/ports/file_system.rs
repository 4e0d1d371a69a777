//! FileSystem port - abstraction over the file operations the runner needs
//!
//! Incremental decisions only look at modification times, so the port is
//! built around `modified` instead of content hashes.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Result type for file system operations
pub type FsResult<T> = Result<T, FsError>;

/// File system operation errors
#[derive(Debug)]
pub enum FsError {
    /// File not found
    NotFound(PathBuf),
    /// Permission denied
    PermissionDenied(PathBuf),
    /// I/O error on a specific path
    Io { path: PathBuf, source: std::io::Error },
}

impl FsError {
    /// Attach a path to a raw I/O error
    pub fn at(path: &Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => FsError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => FsError::PermissionDenied(path.to_path_buf()),
            _ => FsError::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }
}

impl std::fmt::Display for FsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FsError::NotFound(path) => write!(f, "File not found: {}", path.display()),
            FsError::PermissionDenied(path) => {
                write!(f, "Permission denied: {}", path.display())
            }
            FsError::Io { path, source } => write!(f, "I/O error on {}: {}", path.display(), source),
        }
    }
}

impl std::error::Error for FsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FsError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Abstract file system interface
///
/// Implementations:
/// - `LocalFs` - local disk
/// - test doubles in the use case tests
pub trait FileSystem {
    /// Modification time, or `None` if the path does not exist
    fn modified(&self, path: &Path) -> FsResult<Option<SystemTime>>;

    /// Read file content as string
    fn read(&self, path: &Path) -> FsResult<String>;

    /// Replace file content atomically (temp file + rename), creating parents
    fn write_atomic(&self, path: &Path, content: &str) -> FsResult<()>;

    /// Create the file if missing and set its mtime to `time`
    fn touch(&self, path: &Path, time: SystemTime) -> FsResult<()>;

    /// Current time as the file system stamps new files under `dir`.
    ///
    /// Kernel mtimes come from a coarse clock that can lag
    /// `SystemTime::now()` by several milliseconds, so anything compared
    /// against mtimes must be read from here.
    fn clock(&self, dir: &Path) -> FsResult<SystemTime>;

    /// Create a directory and all of its parents
    fn create_dir_all(&self, path: &Path) -> FsResult<()>;

    /// Move `from` over `to`, replacing it
    fn rename(&self, from: &Path, to: &Path) -> FsResult<()>;

    /// Remove a file; a missing file is not an error
    fn remove_file(&self, path: &Path) -> FsResult<()>;

    /// Check if file exists
    fn exists(&self, path: &Path) -> bool {
        matches!(self.modified(path), Ok(Some(_)))
    }
}
