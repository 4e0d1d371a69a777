//! External process plumbing shared by the checker and generator
//!
//! Command templates carry `{name}` placeholders in argv and env values.
//! `{{` and `}}` produce literal braces. Unknown names are rejected when the
//! command is rendered, before anything is spawned.

use std::collections::BTreeMap;
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::config::CommandConfig;
use crate::domain::value_objects::ToolStatus;
use crate::error::{StampError, StampResult};

/// Where a child's stdout goes. Stderr is always inherited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Child shares our stdout
    #[default]
    Inherit,
    /// Child stdout is copied verbatim to our stderr (keeps stdout NDJSON)
    StdoutToStderr,
}

/// Values available to a command template
#[derive(Debug, Clone, Default)]
pub struct Placeholders {
    values: BTreeMap<&'static str, String>,
}

impl Placeholders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_path(mut self, name: &'static str, path: &Path) -> Self {
        self.values.insert(name, path.to_string_lossy().into_owned());
        self
    }

    /// Substitute every `{name}` in `template`
    pub fn render(&self, template: &str, command: &str) -> StampResult<String> {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(pos) = rest.find(['{', '}']) {
            out.push_str(&rest[..pos]);
            let tail = &rest[pos..];

            if tail.starts_with("{{") || tail.starts_with("}}") {
                out.push_str(&tail[..1]);
                rest = &tail[2..];
                continue;
            }
            if tail.starts_with('}') {
                out.push('}');
                rest = &tail[1..];
                continue;
            }

            match tail[1..].find('}') {
                Some(end) => {
                    let name = &tail[1..=end];
                    let value = self.values.get(name).ok_or_else(|| {
                        StampError::UnknownPlaceholder {
                            name: name.to_string(),
                            command: command.to_string(),
                        }
                    })?;
                    out.push_str(value);
                    rest = &tail[end + 2..];
                }
                None => {
                    out.push_str(tail);
                    rest = "";
                }
            }
        }
        out.push_str(rest);
        Ok(out)
    }
}

/// A fully rendered command, ready to spawn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCommand {
    pub name: String,
    pub argv: Vec<String>,
    pub env: BTreeMap<String, String>,
}

impl RenderedCommand {
    pub fn render(command: &CommandConfig, placeholders: &Placeholders) -> StampResult<Self> {
        let name = command.display_name().to_string();
        if command.argv.is_empty() {
            return Err(StampError::EmptyCommand { name });
        }

        let argv = command
            .argv
            .iter()
            .map(|arg| placeholders.render(arg, &name))
            .collect::<StampResult<Vec<_>>>()?;
        let env = command
            .env
            .iter()
            .map(|(k, v)| Ok((k.clone(), placeholders.render(v, &name)?)))
            .collect::<StampResult<BTreeMap<_, _>>>()?;

        Ok(Self { name, argv, env })
    }

    /// Run to completion, streaming output according to `mode`
    pub fn run(&self, mode: OutputMode) -> StampResult<ToolStatus> {
        let (program, args) = self
            .argv
            .split_first()
            .ok_or_else(|| StampError::EmptyCommand {
                name: self.name.clone(),
            })?;

        debug!(command = %self.name, argv = ?self.argv, "spawning");

        let mut cmd = Command::new(program);
        cmd.args(args)
            .envs(&self.env)
            .stdin(Stdio::null())
            .stderr(Stdio::inherit());

        let spawn_err = |source: io::Error| StampError::Spawn {
            program: program.clone(),
            source,
        };

        let status = match mode {
            OutputMode::Inherit => {
                cmd.stdout(Stdio::inherit());
                cmd.status().map_err(spawn_err)?
            }
            OutputMode::StdoutToStderr => {
                cmd.stdout(Stdio::piped());
                let mut child = cmd.spawn().map_err(spawn_err)?;
                if let Some(mut stdout) = child.stdout.take() {
                    io::copy(&mut stdout, &mut io::stderr())?;
                }
                child.wait()?
            }
        };

        Ok(status.into())
    }
}
