//! Diagnostic logging
//!
//! `tracing` events go to stderr so stdout stays clean for `status` and
//! NDJSON. `RUST_LOG` wins when set; otherwise the level follows the
//! effective verbosity. Colour is only used when stderr is a terminal, so
//! make logs and CI output stay plain.

use is_terminal::IsTerminal;
use tracing_subscriber::EnvFilter;

use crate::config::Verbosity;

/// Combine the configured verbosity with CLI flags.
///
/// `-q` wins; each `-v` raises the level one step.
pub fn effective_verbosity(configured: Verbosity, verbose: u8, quiet: bool) -> Verbosity {
    if quiet {
        return Verbosity::Quiet;
    }
    match verbose {
        0 => configured,
        1 => configured.max(Verbosity::Verbose),
        _ => Verbosity::Debug,
    }
}

/// Filter directive for a verbosity; `-vvv` and beyond means trace
pub fn level_for(verbosity: Verbosity, verbose: u8) -> &'static str {
    if verbose >= 3 {
        return "trace";
    }
    match verbosity {
        Verbosity::Quiet => "error",
        Verbosity::Normal => "warn",
        Verbosity::Verbose => "info",
        Verbosity::Debug => "debug",
    }
}

/// Install the global subscriber. Safe to call more than once.
pub fn init(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(use_ansi(std::io::stderr().is_terminal()))
        .with_target(false)
        .without_time()
        .compact()
        .try_init();
}

/// Colour only on a terminal, and never when `NO_COLOR` is set
fn use_ansi(is_terminal: bool) -> bool {
    is_terminal && std::env::var_os("NO_COLOR").map_or(true, |v| v.is_empty())
}
