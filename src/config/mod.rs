//! Configuration module for stampcheck
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (STAMPCHECK_*)
//! 3. Project config (./stampcheck.toml)
//! 4. User config (<config_dir>/stampcheck/config.toml)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{
    apply_env_overrides, load_with_warnings, resolve, user_config_path, with_env_overrides,
    ConfigWarning, LoadedConfig, CONFIG_HOME_VAR, PROJECT_CONFIG_FILE,
};
pub use types::{
    CheckConfig, CommandConfig, Config, DiscoveryMode, GenerateConfig, OutputConfig, Verbosity,
};
