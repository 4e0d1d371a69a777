//! Check Use Case
//!
//! This module defines the `CheckUseCase`, the incremental check runner.
//! It decides from modification times and the recorded dependencies
//! whether a unit has to be rechecked, runs the checker if so, and on
//! success persists a fresh dependency record and stamp.
//!
//! ## Write ordering
//!
//! The record is written (atomically) before the stamp is touched. An
//! interruption between the two leaves the old stamp behind, so the next
//! run rechecks.
//!
//! ## Edits during a check
//!
//! The mtimes of the target and of the previously recorded prerequisites
//! are snapshotted before the checker starts, and the check start is read
//! from the file system clock. The stamp is only touched when no
//! snapshotted mtime moved (in either direction) and no newly discovered
//! input was written after the start. The stamp gets the start time, or
//! the latest input mtime if that lies in the future.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime};

use tracing::{debug, info, warn};

use crate::domain::entities::{CheckUnit, SourceFile, Stamp};
use crate::domain::ports::{Checker, DependencyDiscovery, FileSystem, RecordRepository};
use crate::domain::services::{evaluate, Freshness, StaleReason};
use crate::domain::value_objects::{normalize, parent_dir};
use crate::error::{StampError, StampResult};

/// Options for the check operation
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckOptions {
    /// Skip the freshness test (like `make -B`)
    pub force: bool,
}

/// What a check run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Stamp was valid; checker not invoked
    UpToDate,
    /// Target no longer exists; checker not invoked, not an error
    SkippedMissingTarget,
    /// Checker passed and the record was written
    Passed {
        dependencies: BTreeSet<PathBuf>,
        /// False when an input changed while the checker ran
        stamped: bool,
    },
    /// Checker failed; stamp and record untouched
    Failed { exit_code: i32 },
}

impl CheckOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, CheckOutcome::Failed { .. })
    }

    /// Process exit code for this outcome
    pub fn exit_code(&self) -> i32 {
        match self {
            CheckOutcome::Failed { exit_code } => *exit_code,
            _ => 0,
        }
    }

    /// Stable identifier for JSON output
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckOutcome::UpToDate => "up_to_date",
            CheckOutcome::SkippedMissingTarget => "skipped_missing_target",
            CheckOutcome::Passed { .. } => "passed",
            CheckOutcome::Failed { .. } => "failed",
        }
    }
}

/// Result of the check operation
#[derive(Debug, Clone)]
pub struct CheckReport {
    /// Verdict the run acted on
    pub freshness: Freshness,
    pub outcome: CheckOutcome,
    pub duration: Duration,
}

impl CheckReport {
    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }

    pub fn exit_code(&self) -> i32 {
        self.outcome.exit_code()
    }

    /// Whether the checker was invoked
    pub fn ran_checker(&self) -> bool {
        matches!(
            self.outcome,
            CheckOutcome::Passed { .. } | CheckOutcome::Failed { .. }
        )
    }
}

/// Input mtimes observed before the checker runs
struct InputSnapshot {
    mtimes: BTreeMap<PathBuf, Option<SystemTime>>,
}

impl InputSnapshot {
    fn latest(&self) -> Option<SystemTime> {
        self.mtimes.values().flatten().max().copied()
    }
}

/// Check Use Case
///
/// Generic over its ports so tests can count checker invocations and
/// control mtimes.
pub struct CheckUseCase<F, R, C, D>
where
    F: FileSystem,
    R: RecordRepository,
    C: Checker,
    D: DependencyDiscovery,
{
    fs: F,
    records: R,
    checker: C,
    discovery: D,
}

impl<F, R, C, D> CheckUseCase<F, R, C, D>
where
    F: FileSystem,
    R: RecordRepository,
    C: Checker,
    D: DependencyDiscovery,
{
    /// Create a new CheckUseCase
    pub fn new(fs: F, records: R, checker: C, discovery: D) -> Self {
        Self {
            fs,
            records,
            checker,
            discovery,
        }
    }

    /// Evaluate freshness without invoking anything
    pub fn plan(&self, unit: &CheckUnit) -> StampResult<Freshness> {
        let target = SourceFile::observe(&self.fs, unit.target())?;
        if !target.exists() {
            return Ok(Freshness::TargetMissing);
        }
        let stamp = Stamp::load(&self.fs, &unit.stamp)?;
        let record = self.records.load(&unit.dep_file);
        Ok(evaluate(&self.fs, &target, &stamp, &record)?)
    }

    /// Execute the check operation
    pub fn execute(&self, unit: &CheckUnit, options: CheckOptions) -> StampResult<CheckReport> {
        let start = Instant::now();

        let freshness = if options.force {
            match SourceFile::observe(&self.fs, unit.target())?.exists() {
                true => Freshness::Stale(StaleReason::Forced),
                false => Freshness::TargetMissing,
            }
        } else {
            self.plan(unit)?
        };

        let outcome = match &freshness {
            Freshness::TargetMissing => {
                info!(file = %unit.target.display(), "target missing, nothing to check");
                CheckOutcome::SkippedMissingTarget
            }
            Freshness::Fresh => {
                debug!(file = %unit.target.display(), "up to date");
                CheckOutcome::UpToDate
            }
            Freshness::Stale(reason) => {
                info!(file = %unit.target.display(), reason = %reason, "checking");
                self.run_checker(unit)?
            }
        };

        Ok(CheckReport {
            freshness,
            outcome,
            duration: start.elapsed(),
        })
    }

    fn run_checker(&self, unit: &CheckUnit) -> StampResult<CheckOutcome> {
        let before = self.snapshot(unit)?;
        let started = self.started_at(unit, &before);
        let result = self.checker.check(unit)?;

        if !result.status.is_success() {
            let exit_code = result.status.exit_code();
            debug!(file = %unit.target.display(), exit_code, "check failed, stamp left alone");
            return Ok(CheckOutcome::Failed { exit_code });
        }

        let mut dependencies = self.discovery.discover(unit, result.reported.as_deref())?;
        dependencies.insert(normalize(unit.target()));

        let mut record = self.records.load_or_new(&unit.dep_file);
        record.set_rule(&unit.stamp, &dependencies);
        self.records
            .save(&record, &unit.dep_file)
            .map_err(|e| StampError::RecordWrite {
                path: unit.dep_file.clone(),
                message: e.to_string(),
            })?;

        let stamped = match self.changed_during_check(&before, &dependencies, started)? {
            Some(changed) => {
                warn!(
                    file = %unit.target.display(),
                    changed = %changed.display(),
                    "input modified during check; stamp not updated"
                );
                false
            }
            None => {
                let time = match before.latest() {
                    Some(latest) if latest > started => {
                        warn!(
                            file = %unit.target.display(),
                            "input modification time is in the future; stamp set to match"
                        );
                        latest
                    }
                    _ => started,
                };
                self.fs.touch(&unit.stamp, time)?;
                true
            }
        };

        debug!(
            file = %unit.target.display(),
            dependencies = dependencies.len(),
            stamped,
            "check passed"
        );
        Ok(CheckOutcome::Passed {
            dependencies,
            stamped,
        })
    }

    /// Mtimes of the target and of the prerequisites recorded last time
    fn snapshot(&self, unit: &CheckUnit) -> StampResult<InputSnapshot> {
        let mut inputs = BTreeSet::from([normalize(unit.target())]);
        if let Ok(record) = self.records.load(&unit.dep_file) {
            if let Some(deps) = record.dependencies_of(&unit.stamp) {
                inputs.extend(deps.iter().cloned());
            }
        }

        let mut mtimes = BTreeMap::new();
        for path in inputs {
            let modified = self.fs.modified(&path)?;
            mtimes.insert(path, modified);
        }
        Ok(InputSnapshot { mtimes })
    }

    /// Check start on the file system clock, sampled next to the target
    fn started_at(&self, unit: &CheckUnit, before: &InputSnapshot) -> SystemTime {
        let dir = parent_dir(unit.target());
        match self.fs.clock(&dir) {
            Ok(now) => now,
            Err(e) => {
                debug!(dir = %dir.display(), error = %e, "cannot sample file system clock");
                before.latest().unwrap_or_else(SystemTime::now)
            }
        }
    }

    /// First input that changed while the checker ran: a snapshotted one
    /// whose mtime moved, or a newly discovered one written after `started`
    fn changed_during_check(
        &self,
        before: &InputSnapshot,
        inputs: &BTreeSet<PathBuf>,
        started: SystemTime,
    ) -> StampResult<Option<PathBuf>> {
        for (path, mtime) in &before.mtimes {
            if self.fs.modified(path)? != *mtime {
                return Ok(Some(path.clone()));
            }
        }
        for path in inputs.iter().filter(|p| !before.mtimes.contains_key(*p)) {
            if SourceFile::observe(&self.fs, path)?.is_newer_than(started) {
                return Ok(Some(path.clone()));
            }
        }
        Ok(None)
    }
}
