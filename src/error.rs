//! Error types for stampcheck
//!
//! Library code returns `StampResult`; the binaries wrap it in `anyhow`.
//! A failing checker is *not* an error: it is reported through
//! `CheckOutcome::Failed` so its exit code can be propagated verbatim.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::FsError;

/// Result type alias for stampcheck operations
pub type StampResult<T> = Result<T, StampError>;

/// Main error type for stampcheck operations
#[derive(Error, Debug)]
pub enum StampError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File system port error
    #[error(transparent)]
    Fs(#[from] FsError),

    /// Invalid or unreadable configuration file
    #[error("invalid config in {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// Command template references a placeholder we don't know
    #[error("unknown placeholder '{{{name}}}' in command '{command}'")]
    UnknownPlaceholder { name: String, command: String },

    /// Command template has no program
    #[error("command '{name}' has an empty argv")]
    EmptyCommand { name: String },

    /// External tool could not be started
    #[error("failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// UI descriptor for a generate rule does not exist
    #[error("descriptor not found: {path}")]
    DescriptorNotFound { path: PathBuf },

    /// Dependency record could not be written
    #[error("failed to write dependency record {path}: {message}")]
    RecordWrite { path: PathBuf, message: String },
}
