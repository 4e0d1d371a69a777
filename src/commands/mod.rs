//! Command runners shared by the `stampcheck` and `check-py` binaries
//!
//! Each runner returns the process exit code. `Err` is reserved for
//! stampcheck's own failures, which the binaries map to exit code 2.

mod check;
mod generate;
mod status;

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use tracing::warn;

use crate::config::{self, Config, Verbosity};
use crate::infrastructure::OutputMode;
use crate::logging;
use crate::presentation::exit_code::EXIT_ERROR;
use crate::presentation::{Cli, Commands, JsonEventWriter, TextRenderer};

pub use check::cmd_check;
pub use generate::cmd_generate;
pub use status::cmd_status;

/// Everything a command needs besides its own arguments
pub struct CommandContext {
    pub config: Config,
    pub json: bool,
    pub verbosity: Verbosity,
}

impl CommandContext {
    /// Resolve configuration and install logging
    pub fn init(config_path: Option<&Path>, json: bool, verbose: u8, quiet: bool) -> Result<Self> {
        let project_root = std::env::current_dir()?;
        let loaded = config::resolve(config_path, &project_root);

        // Logging comes up even when the config is broken, so the error
        // below is reported at the right level.
        let configured = loaded
            .as_ref()
            .map(|l| l.config.output.verbosity)
            .unwrap_or_default();
        let verbosity = logging::effective_verbosity(configured, verbose, quiet);
        logging::init(logging::level_for(verbosity, verbose));

        let loaded = loaded?;
        for warning in &loaded.warnings {
            match &warning.suggestion {
                Some(suggestion) => warn!(
                    key = %warning.key,
                    file = %warning.file.display(),
                    line = ?warning.line,
                    "unknown config key; did you mean '{}'?",
                    suggestion
                ),
                None => warn!(
                    key = %warning.key,
                    file = %warning.file.display(),
                    line = ?warning.line,
                    "unknown config key"
                ),
            }
        }

        Ok(Self {
            config: loaded.config,
            json,
            verbosity,
        })
    }

    /// Child stdout is moved to stderr in JSON mode so stdout stays NDJSON
    pub fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::StdoutToStderr
        } else {
            OutputMode::Inherit
        }
    }

    pub fn renderer(&self) -> TextRenderer {
        TextRenderer::new(self.verbosity)
    }

    /// Event writer for `command`, or `None` in text mode
    pub fn events(&self, command: &'static str) -> Option<JsonEventWriter> {
        self.json.then(|| JsonEventWriter::stdout(command))
    }
}

/// Run the multi-command `stampcheck` binary
pub fn run(cli: Cli) -> i32 {
    let command = cli.command.name();
    let result = CommandContext::init(cli.config.as_deref(), cli.json, cli.verbose, cli.quiet)
        .and_then(|ctx| match &cli.command {
            Commands::Check(args) => cmd_check(&ctx, args),
            Commands::Status(args) => cmd_status(&ctx, args),
            Commands::Generate(args) => cmd_generate(&ctx, args),
        });
    finish(result, command, cli.json)
}

/// Map a runner result to an exit code, reporting errors
pub fn finish(result: Result<i32>, command: &'static str, json: bool) -> i32 {
    match result {
        Ok(code) => code,
        Err(err) => {
            if json {
                let mut events = JsonEventWriter::stdout(command);
                events.error(&format!("{:#}", err));
                events.complete(false, EXIT_ERROR, Duration::ZERO);
            } else {
                eprintln!("{}: error: {:#}", command, err);
            }
            EXIT_ERROR
        }
    }
}
