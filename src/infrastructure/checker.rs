//! Command-line checker
//!
//! Implements the Checker port by spawning the configured commands in
//! order, stopping at the first failure (as a make recipe joined with
//! `&&` would).

use std::path::PathBuf;

use tracing::{debug, info};

use crate::config::CommandConfig;
use crate::domain::entities::CheckUnit;
use crate::domain::ports::{Checker, CheckerOutcome};
use crate::error::{StampError, StampResult};
use crate::infrastructure::discovery::parse_reported;
use crate::infrastructure::process::{OutputMode, Placeholders, RenderedCommand};

/// Placeholder bound to a fresh temp file the checker may list its inputs in
pub const DEPS_OUT: &str = "deps_out";

/// Runs a chain of external checker commands
pub struct CommandChecker {
    commands: Vec<CommandConfig>,
    mode: OutputMode,
}

impl CommandChecker {
    pub fn new(commands: Vec<CommandConfig>) -> Self {
        Self {
            commands,
            mode: OutputMode::default(),
        }
    }

    pub fn with_output_mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }

    fn placeholders(unit: &CheckUnit) -> Placeholders {
        Placeholders::new()
            .with_path("target", &unit.target)
            .with_path("stamp", &unit.stamp)
            .with_path("dep_file", &unit.dep_file)
            .with_path("source_root", &unit.source_root)
            .with_path("lib_path", &unit.lib_path)
    }
}

impl Checker for CommandChecker {
    fn check(&self, unit: &CheckUnit) -> StampResult<CheckerOutcome> {
        let base = Self::placeholders(unit);

        // Render everything up front so a bad template fails before any
        // command has run.
        let mut prepared = Vec::with_capacity(self.commands.len());
        for command in &self.commands {
            let report = if command.uses_placeholder(DEPS_OUT) {
                Some(tempfile::NamedTempFile::new()?.into_temp_path())
            } else {
                None
            };
            let placeholders = match &report {
                Some(path) => base.clone().with_path(DEPS_OUT, path),
                None => base.clone(),
            };
            prepared.push((RenderedCommand::render(command, &placeholders)?, report));
        }

        let mut reported: Option<Vec<PathBuf>> = None;
        for (command, report) in prepared {
            info!(command = %command.name, file = %unit.target.display(), "running checker");
            let status = command.run(self.mode)?;
            if !status.is_success() {
                debug!(command = %command.name, exit_code = status.exit_code(), "checker failed");
                return Ok(CheckerOutcome {
                    status,
                    reported: None,
                });
            }

            if let Some(path) = report {
                let content = std::fs::read_to_string(&path).map_err(|source| {
                    StampError::Io(std::io::Error::new(
                        source.kind(),
                        format!("reading {} report: {}", command.name, source),
                    ))
                })?;
                reported
                    .get_or_insert_with(Vec::new)
                    .extend(parse_reported(&content));
            }
        }

        let outcome = CheckerOutcome::passed();
        Ok(match reported {
            Some(paths) => outcome.with_reported(paths),
            None => outcome,
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::domain::value_objects::ToolStatus;
    use tempfile::tempdir;

    fn sh(name: &str, script: &str) -> CommandConfig {
        CommandConfig::new(name, ["sh", "-c", script])
    }

    fn unit(dir: &std::path::Path) -> CheckUnit {
        CheckUnit::new(dir.join("App.py"), dir.join("s"), dir.join(".dep-py~"))
    }

    #[test]
    fn passes_when_every_command_passes() {
        let dir = tempdir().unwrap();
        let checker = CommandChecker::new(vec![sh("a", "true"), sh("b", "exit 0")])
            .with_output_mode(OutputMode::StdoutToStderr);

        let outcome = checker.check(&unit(dir.path())).unwrap();

        assert_eq!(outcome, CheckerOutcome::passed());
    }

    #[test]
    fn first_failure_stops_the_chain() {
        let dir = tempdir().unwrap();
        let marker = dir.path().join("second-ran");
        let checker = CommandChecker::new(vec![
            sh("a", "exit 4"),
            sh("b", &format!("touch {}", marker.display())),
        ]);

        let outcome = checker.check(&unit(dir.path())).unwrap();

        assert_eq!(outcome.status, ToolStatus::Failed { exit_code: Some(4) });
        assert!(!marker.exists());
    }

    #[test]
    fn placeholders_reach_the_command() {
        let dir = tempdir().unwrap();
        let seen = dir.path().join("seen");
        let command = CommandConfig::new(
            "echo",
            [
                "sh".to_string(),
                "-c".to_string(),
                format!("echo \"$1 $LIB\" > {}", seen.display()),
                "sh".to_string(),
                "{target}".to_string(),
            ],
        )
        .with_env("LIB", "{lib_path}");

        CommandChecker::new(vec![command])
            .check(&unit(dir.path()).with_roots(".", "vendor"))
            .unwrap();

        let written = std::fs::read_to_string(&seen).unwrap();
        assert_eq!(
            written.trim(),
            format!("{} vendor", dir.path().join("App.py").display())
        );
    }

    #[test]
    fn reported_inputs_are_collected() {
        let dir = tempdir().unwrap();
        let command = CommandConfig::new(
            "report",
            ["sh", "-c", "printf 'App.py\\n# note\\nlib/util.py\\n' > \"$1\"", "sh", "{deps_out}"],
        );

        let outcome = CommandChecker::new(vec![command])
            .check(&unit(dir.path()))
            .unwrap();

        assert_eq!(
            outcome.reported,
            Some(vec![PathBuf::from("App.py"), PathBuf::from("lib/util.py")])
        );
    }

    #[test]
    fn unknown_placeholder_fails_before_running_anything() {
        let dir = tempdir().unwrap();
        let marker = dir.path().join("ran");
        let checker = CommandChecker::new(vec![
            sh("first", &format!("touch {}", marker.display())),
            CommandConfig::new("bad", ["mypy", "{srcroot}"]),
        ]);

        let err = checker.check(&unit(dir.path())).unwrap_err();

        assert!(matches!(err, StampError::UnknownPlaceholder { .. }));
        assert!(!marker.exists());
    }
}
