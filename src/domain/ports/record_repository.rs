//! RecordRepository port - persistence of dependency records
//!
//! Keeps the make-include syntax out of the domain layer.

use std::path::Path;

use crate::domain::entities::DependencyRecord;

/// Result type for record operations
pub type RecordResult<T> = Result<T, RecordError>;

/// Record operation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// Record file does not exist yet
    NotFound,
    /// Record exists but is not a valid make include
    Parse(String),
    /// I/O error
    Io(String),
}

impl std::fmt::Display for RecordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordError::NotFound => write!(f, "Dependency record not found"),
            RecordError::Parse(msg) => write!(f, "Invalid dependency record: {}", msg),
            RecordError::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for RecordError {}

pub trait RecordRepository {
    /// Load the record at `path`
    fn load(&self, path: &Path) -> RecordResult<DependencyRecord>;

    /// Load the record, or an empty one if missing or unreadable
    fn load_or_new(&self, path: &Path) -> DependencyRecord {
        self.load(path).unwrap_or_default()
    }

    /// Save the record to `path` atomically
    fn save(&self, record: &DependencyRecord, path: &Path) -> RecordResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_error_display() {
        let err = RecordError::Parse("missing separator on line 2".to_string());
        assert!(err.to_string().contains("line 2"));
    }
}
