//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{StampError, StampResult};

use super::types::{CommandConfig, Config, DiscoveryMode, Verbosity};

/// Project config file name, looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = "stampcheck.toml";

/// Overrides the user config directory (tests, sandboxed CI)
pub const CONFIG_HOME_VAR: &str = "STAMPCHECK_CONFIG_HOME";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// A resolved configuration and where it came from
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub config: Config,
    /// File the config was read from; `None` for built-in defaults
    pub source: Option<PathBuf>,
    pub warnings: Vec<ConfigWarning>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> StampResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path).map_err(|e| StampError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| StampError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Resolve the effective configuration.
///
/// An explicit path must exist. Otherwise the project config, then the
/// user config, then defaults; environment overrides apply on top of
/// whichever was found.
pub fn resolve(explicit: Option<&Path>, project_root: &Path) -> StampResult<LoadedConfig> {
    let candidate = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => [
            Some(project_root.join(PROJECT_CONFIG_FILE)),
            user_config_path(),
        ]
        .into_iter()
        .flatten()
        .find(|p| p.is_file()),
    };

    let loaded = match candidate {
        Some(path) => {
            let (config, warnings) = load_with_warnings(&path)?;
            LoadedConfig {
                config,
                source: Some(path),
                warnings,
            }
        }
        None => LoadedConfig::default(),
    };

    Ok(LoadedConfig {
        config: with_env_overrides(loaded.config),
        ..loaded
    })
}

/// `<config_dir>/stampcheck/config.toml`
pub fn user_config_path() -> Option<PathBuf> {
    std::env::var_os(CONFIG_HOME_VAR)
        .map(PathBuf::from)
        .or_else(dirs::config_dir)
        .map(|dir| dir.join("stampcheck").join("config.toml"))
}

/// Apply environment variable overrides (STAMPCHECK_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    apply_env_overrides(config, |key| std::env::var(key).ok())
}

/// Apply overrides from an arbitrary variable source
pub fn apply_env_overrides<F>(mut config: Config, lookup: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    // STAMPCHECK_DISCOVERY
    if let Some(mode) = lookup("STAMPCHECK_DISCOVERY").as_deref().and_then(DiscoveryMode::parse) {
        config.check.discovery = mode;
    }

    // STAMPCHECK_CHECKER (whitespace-separated argv, replaces all commands)
    if let Some(argv) = lookup("STAMPCHECK_CHECKER").map(|v| split_argv(&v)) {
        if let Some(program) = argv.first().cloned() {
            config.check.commands = vec![CommandConfig::new(&program, argv)];
        }
    }

    // STAMPCHECK_GENERATOR
    if let Some(argv) = lookup("STAMPCHECK_GENERATOR").map(|v| split_argv(&v)) {
        if !argv.is_empty() {
            config.generate.argv = argv;
        }
    }

    // STAMPCHECK_VERBOSITY
    if let Some(verbosity) = lookup("STAMPCHECK_VERBOSITY").as_deref().and_then(Verbosity::parse) {
        config.output.verbosity = verbosity;
    }

    config
}

fn split_argv(value: &str) -> Vec<String> {
    value.split_whitespace().map(String::from).collect()
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "check",
        "discovery",
        "commands",
        "name",
        "argv",
        "env",
        "generate",
        "output",
        "verbosity",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
