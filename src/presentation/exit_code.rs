//! Process exit codes
//!
//! - 0: success, or nothing to do
//! - N: the checker or generator exited with N (signal deaths map to 1)
//! - 1: `status` found the unit stale
//! - 2: stampcheck's own errors (config, I/O, spawn, usage)

use crate::application::{CheckReport, GenerateReport};
use crate::domain::services::Freshness;

/// Exit code for stampcheck's own failures; matches clap's usage errors
pub const EXIT_ERROR: i32 = 2;

/// Exit code for `status` on a stale unit
pub const EXIT_STALE: i32 = 1;

pub fn for_check(report: &CheckReport) -> i32 {
    report.exit_code()
}

pub fn for_status(freshness: &Freshness) -> i32 {
    if freshness.needs_check() {
        EXIT_STALE
    } else {
        0
    }
}

pub fn for_generate(report: &GenerateReport) -> i32 {
    report.outcome.exit_code()
}
