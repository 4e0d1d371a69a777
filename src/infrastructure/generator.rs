//! Command-line UI generator (`pyuic5` and friends)

use std::path::Path;

use tracing::info;

use crate::config::CommandConfig;
use crate::domain::ports::Generator;
use crate::domain::value_objects::ToolStatus;
use crate::error::StampResult;
use crate::infrastructure::process::{OutputMode, Placeholders, RenderedCommand};

/// Runs the configured generator command
pub struct CommandGenerator {
    command: CommandConfig,
    mode: OutputMode,
}

impl CommandGenerator {
    pub fn new(command: CommandConfig) -> Self {
        Self {
            command,
            mode: OutputMode::default(),
        }
    }

    pub fn with_output_mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }
}

impl Generator for CommandGenerator {
    fn generate(&self, descriptor: &Path, output: &Path) -> StampResult<ToolStatus> {
        let placeholders = Placeholders::new()
            .with_path("descriptor", descriptor)
            .with_path("output", output);
        let command = RenderedCommand::render(&self.command, &placeholders)?;

        info!(command = %command.name, descriptor = %descriptor.display(), "running generator");
        command.run(self.mode)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn generator_receives_descriptor_and_output() {
        let dir = tempdir().unwrap();
        let descriptor = dir.path().join("MainWindow.ui");
        let output = dir.path().join("Ui_MainWindow.py");
        std::fs::write(&descriptor, "<ui/>").unwrap();
        let generator = CommandGenerator::new(CommandConfig::new(
            "fake-uic",
            ["sh", "-c", "cp \"$1\" \"$2\"", "sh", "{descriptor}", "{output}"],
        ));

        let status = generator.generate(&descriptor, &output).unwrap();

        assert!(status.is_success());
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "<ui/>");
    }

    #[test]
    fn generator_failure_is_a_status() {
        let dir = tempdir().unwrap();
        let generator = CommandGenerator::new(CommandConfig::new("fail", ["sh", "-c", "exit 5"]));

        let status = generator
            .generate(&dir.path().join("a.ui"), &dir.path().join("a.py"))
            .unwrap();

        assert_eq!(status.exit_code(), 5);
    }
}
