//! Output Rendering
//!
//! Human-readable lines for the text mode. A build tool stays quiet when
//! there is nothing to say: up-to-date units print nothing at the default
//! verbosity, and checker output is never rewritten.

use std::path::Path;

use crate::application::{CheckOutcome, CheckReport, GenerateOutcome, GenerateReport};
use crate::config::Verbosity;
use crate::domain::entities::CheckUnit;
use crate::domain::services::Freshness;

/// Text renderer; every method returns the line to print, if any
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer {
    pub verbosity: Verbosity,
}

impl TextRenderer {
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }

    /// Line for stderr after a check run
    pub fn check(&self, unit: &CheckUnit, report: &CheckReport) -> Option<String> {
        let target = unit.target.display();
        match &report.outcome {
            CheckOutcome::Failed { exit_code } if self.verbosity > Verbosity::Quiet => {
                Some(format!("[FAIL] {} (exit {})", target, exit_code))
            }
            CheckOutcome::Passed { dependencies, .. } if self.verbosity >= Verbosity::Verbose => {
                Some(format!(
                    "[OK] {} ({} dependencies, {} ms)",
                    target,
                    dependencies.len(),
                    report.duration.as_millis()
                ))
            }
            CheckOutcome::UpToDate if self.verbosity >= Verbosity::Verbose => {
                Some(format!("[ ] {} up to date", target))
            }
            CheckOutcome::SkippedMissingTarget if self.verbosity >= Verbosity::Verbose => {
                Some(format!("[ ] {} missing, skipped", target))
            }
            _ => None,
        }
    }

    /// Line for stdout from `status`; always printed
    pub fn status(&self, unit: &CheckUnit, freshness: &Freshness) -> String {
        format!("{}: {}", unit.target.display(), freshness)
    }

    /// Line for stderr after a generate run
    pub fn generate(&self, output: &Path, report: &GenerateReport) -> Option<String> {
        match report.outcome {
            GenerateOutcome::Failed { exit_code } if self.verbosity > Verbosity::Quiet => {
                Some(format!("[FAIL] {} (exit {})", output.display(), exit_code))
            }
            GenerateOutcome::Generated if self.verbosity >= Verbosity::Verbose => {
                Some(format!("[OK] {} generated", output.display()))
            }
            GenerateOutcome::UpToDate if self.verbosity >= Verbosity::Verbose => {
                Some(format!("[ ] {} up to date", output.display()))
            }
            _ => None,
        }
    }
}
