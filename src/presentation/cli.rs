//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! ## Design Notes
//!
//! - Global flags (--json, --verbose, --quiet, --config) are inherited by all subcommands
//! - `check-py` takes the same five positionals as `stampcheck check`, so a
//!   makefile can switch between them without touching its recipe

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// stampcheck - incremental checker and UI generator runner for make
#[derive(Parser, Debug)]
#[command(name = "stampcheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Emit NDJSON events on stdout
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only report errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Config file (defaults to ./stampcheck.toml, then the user config)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check a source file unless its stamp is up to date
    Check(CheckArgs),

    /// Report whether a source file needs checking (exit 1 when stale)
    Status(StatusArgs),

    /// Regenerate a source file from its UI descriptor when stale
    Generate(GenerateArgs),
}

impl Commands {
    /// Command name used in JSON events
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Check(_) => "check",
            Commands::Status(_) => "status",
            Commands::Generate(_) => "generate",
        }
    }
}

/// The `check-py` positional contract
#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Source file to check
    pub target: PathBuf,

    /// Stamp file touched after a successful check
    pub stamp: PathBuf,

    /// Make-include file holding the dependency record
    pub dep_file: PathBuf,

    /// Root the target's imports are resolved against
    pub source_root: PathBuf,

    /// Extra library path
    pub lib_path: PathBuf,

    /// Check even if the stamp is up to date
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    /// Source file
    pub target: PathBuf,

    /// Stamp file
    pub stamp: PathBuf,

    /// Make-include file holding the dependency record
    pub dep_file: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// UI descriptor (.ui)
    pub descriptor: PathBuf,

    /// Generated Python module
    #[arg(short, long)]
    pub output: PathBuf,

    /// Regenerate even if the output is up to date
    #[arg(short, long)]
    pub force: bool,
}

/// check-py - check a Python source file unless its stamp is up to date
#[derive(Parser, Debug)]
#[command(name = "check-py")]
#[command(author, version, about, long_about = None)]
pub struct CheckPyCli {
    #[command(flatten)]
    pub args: CheckArgs,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Config file (defaults to ./stampcheck.toml, then the user config)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}
