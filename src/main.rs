//! stampcheck CLI - incremental checks and UI generation for make
//!
//! Usage: stampcheck <COMMAND>
//!
//! Commands:
//!   check     Check a source file unless its stamp is up to date
//!   status    Report whether a source file needs checking
//!   generate  Regenerate a source file from its UI descriptor

use clap::Parser;

use stampcheck::commands;
use stampcheck::presentation::Cli;

fn main() {
    let cli = Cli::parse();
    std::process::exit(commands::run(cli));
}
