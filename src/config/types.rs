//! Configuration type definitions

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::StampResult;

use super::loader::{self, ConfigWarning};

/// How a unit's dependencies are discovered after a successful check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DiscoveryMode {
    /// Static scan of Python imports
    #[default]
    Imports,
    /// Whatever the checker writes to `{deps_out}`
    Reported,
    /// Only the target file itself
    Target,
}

impl DiscoveryMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "imports" => Some(Self::Imports),
            "reported" => Some(Self::Reported),
            "target" => Some(Self::Target),
            _ => None,
        }
    }
}

/// One external command (a checker, or the generator)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandConfig {
    #[serde(default)]
    pub name: String,

    pub argv: Vec<String>,

    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

impl CommandConfig {
    pub fn new<I, S>(name: &str, argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.to_string(),
            argv: argv.into_iter().map(Into::into).collect(),
            env: BTreeMap::new(),
        }
    }

    pub fn with_env(mut self, key: &str, value: &str) -> Self {
        self.env.insert(key.to_string(), value.to_string());
        self
    }

    /// Configured name, falling back to the program
    pub fn display_name(&self) -> &str {
        if !self.name.is_empty() {
            return &self.name;
        }
        self.argv.first().map(String::as_str).unwrap_or("<empty>")
    }

    /// Whether `{name}` appears in argv or env values
    pub fn uses_placeholder(&self, name: &str) -> bool {
        let token = format!("{{{}}}", name);
        self.argv
            .iter()
            .chain(self.env.values())
            .any(|s| s.contains(&token))
    }
}

/// `[check]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckConfig {
    #[serde(default)]
    pub discovery: DiscoveryMode,

    #[serde(default = "default_check_commands")]
    pub commands: Vec<CommandConfig>,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            discovery: DiscoveryMode::default(),
            commands: default_check_commands(),
        }
    }
}

fn default_check_commands() -> Vec<CommandConfig> {
    vec![
        CommandConfig::new("mypy", ["mypy", "{target}"])
            .with_env("MYPYPATH", "{source_root}:{lib_path}"),
        CommandConfig::new("flake8", ["flake8", "{target}"]),
    ]
}

/// `[generate]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateConfig {
    #[serde(default = "default_generate_argv")]
    pub argv: Vec<String>,

    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            argv: default_generate_argv(),
            env: BTreeMap::new(),
        }
    }
}

impl GenerateConfig {
    pub fn command(&self) -> CommandConfig {
        CommandConfig {
            name: String::new(),
            argv: self.argv.clone(),
            env: self.env.clone(),
        }
    }
}

fn default_generate_argv() -> Vec<String> {
    ["pyuic5", "{descriptor}", "-o", "{output}"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
    Debug,
}

impl Verbosity {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "quiet" => Some(Self::Quiet),
            "normal" => Some(Self::Normal),
            "verbose" => Some(Self::Verbose),
            "debug" => Some(Self::Debug),
            _ => None,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub verbosity: Verbosity,
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub check: CheckConfig,

    #[serde(default)]
    pub generate: GenerateConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> StampResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect unknown-key warnings
    pub fn load_with_warnings(path: &Path) -> StampResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }
}
