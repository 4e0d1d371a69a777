//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Creating use cases with infrastructure dependencies
//! - Output formatting (text/NDJSON) and exit codes
//!
//! ## Structure
//!
//! - `cli` - `stampcheck` and `check-py` argument definitions
//! - `factory` - Creates use cases with proper dependencies (dependency injection)
//! - `output` - Human-readable rendering
//! - `json` - NDJSON events
//! - `exit_code` - Outcome to process exit code mapping

pub mod cli;
pub mod exit_code;
pub mod factory;
pub mod json;
pub mod output;

pub use cli::{CheckArgs, CheckPyCli, Cli, Commands, GenerateArgs, StatusArgs};
pub use factory::{create_check_use_case, create_generate_use_case};
pub use json::JsonEventWriter;
pub use output::TextRenderer;
