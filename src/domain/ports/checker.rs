//! Checker port - the external static checker as an opaque service
//!
//! A checker failing is a normal outcome, not an `Err`: the caller needs
//! the exit code to hand back to make.

use std::path::PathBuf;

use crate::domain::entities::CheckUnit;
use crate::domain::value_objects::ToolStatus;
use crate::error::StampResult;

/// What a checker run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckerOutcome {
    pub status: ToolStatus,
    /// Input files the checker itself reported, if it reports any
    pub reported: Option<Vec<PathBuf>>,
}

impl CheckerOutcome {
    pub fn passed() -> Self {
        Self {
            status: ToolStatus::Success,
            reported: None,
        }
    }

    pub fn failed(exit_code: Option<i32>) -> Self {
        Self {
            status: ToolStatus::Failed { exit_code },
            reported: None,
        }
    }

    pub fn with_reported(mut self, reported: Vec<PathBuf>) -> Self {
        self.reported = Some(reported);
        self
    }
}

/// Runs the static checker over one unit
pub trait Checker {
    /// `Err` only when the checker could not be run at all
    fn check(&self, unit: &CheckUnit) -> StampResult<CheckerOutcome>;
}
