//! Freshness evaluation
//!
//! Decides whether a unit's stamp is still valid. A stamp is valid only if
//! it is newer than the target and every prerequisite in its recorded
//! rule. The checks run in a fixed order, so the first reason found is
//! the one reported.

use std::fmt;
use std::path::PathBuf;

use crate::domain::entities::{DependencyRecord, SourceFile, Stamp};
use crate::domain::ports::{FileSystem, FsResult, RecordError, RecordResult};

/// Why a unit has to be rechecked
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StaleReason {
    StampMissing,
    TargetNewer,
    RecordMissing,
    RecordUnreadable(String),
    NoRuleForStamp,
    DependencyNewer(PathBuf),
    DependencyMissing(PathBuf),
    Forced,
}

impl StaleReason {
    /// Stable identifier for JSON output
    pub fn code(&self) -> &'static str {
        match self {
            StaleReason::StampMissing => "stamp_missing",
            StaleReason::TargetNewer => "target_newer",
            StaleReason::RecordMissing => "record_missing",
            StaleReason::RecordUnreadable(_) => "record_unreadable",
            StaleReason::NoRuleForStamp => "no_rule_for_stamp",
            StaleReason::DependencyNewer(_) => "dependency_newer",
            StaleReason::DependencyMissing(_) => "dependency_missing",
            StaleReason::Forced => "forced",
        }
    }
}

impl fmt::Display for StaleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StaleReason::StampMissing => write!(f, "stamp missing"),
            StaleReason::TargetNewer => write!(f, "target newer than stamp"),
            StaleReason::RecordMissing => write!(f, "dependency record missing"),
            StaleReason::RecordUnreadable(msg) => {
                write!(f, "dependency record unreadable: {}", msg)
            }
            StaleReason::NoRuleForStamp => write!(f, "no rule for stamp in dependency record"),
            StaleReason::DependencyNewer(path) => {
                write!(f, "dependency newer than stamp: {}", path.display())
            }
            StaleReason::DependencyMissing(path) => {
                write!(f, "dependency missing: {}", path.display())
            }
            StaleReason::Forced => write!(f, "forced"),
        }
    }
}

/// Verdict for one unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Freshness {
    /// Stamp is valid; nothing to do
    Fresh,
    /// Checker must run
    Stale(StaleReason),
    /// Target is gone; a benign no-op
    TargetMissing,
}

impl Freshness {
    pub fn needs_check(&self) -> bool {
        matches!(self, Freshness::Stale(_))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Freshness::Fresh => "fresh",
            Freshness::Stale(_) => "stale",
            Freshness::TargetMissing => "missing",
        }
    }

    pub fn reason(&self) -> Option<&StaleReason> {
        match self {
            Freshness::Stale(reason) => Some(reason),
            _ => None,
        }
    }
}

impl fmt::Display for Freshness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Freshness::Stale(reason) => write!(f, "stale ({})", reason),
            other => f.write_str(other.as_str()),
        }
    }
}

/// Evaluate a unit against its stamp and loaded record.
///
/// Only the record's prerequisites are stat'ed here; `target` and
/// `stamp` are observed by the caller.
pub fn evaluate<F: FileSystem + ?Sized>(
    fs: &F,
    target: &SourceFile,
    stamp: &Stamp,
    record: &RecordResult<DependencyRecord>,
) -> FsResult<Freshness> {
    if !target.exists() {
        return Ok(Freshness::TargetMissing);
    }
    if !stamp.exists() {
        return Ok(Freshness::Stale(StaleReason::StampMissing));
    }
    if stamp.is_older_than(target) {
        return Ok(Freshness::Stale(StaleReason::TargetNewer));
    }

    let record = match record {
        Ok(record) => record,
        Err(RecordError::NotFound) => return Ok(Freshness::Stale(StaleReason::RecordMissing)),
        Err(err) => {
            return Ok(Freshness::Stale(StaleReason::RecordUnreadable(
                err.to_string(),
            )))
        }
    };

    let Some(dependencies) = record.dependencies_of(stamp.path()) else {
        return Ok(Freshness::Stale(StaleReason::NoRuleForStamp));
    };

    for dep in dependencies {
        let file = SourceFile::observe(fs, dep)?;
        if !file.exists() {
            return Ok(Freshness::Stale(StaleReason::DependencyMissing(dep.clone())));
        }
        if stamp.is_older_than(&file) {
            return Ok(Freshness::Stale(StaleReason::DependencyNewer(dep.clone())));
        }
    }

    Ok(Freshness::Fresh)
}
