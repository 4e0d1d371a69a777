//! check-py - `check-py <target> <stamp> <dep-file> <source-root> <extra-lib-path>`
//!
//! Exit code 0 when the target is up to date, missing, or passes; the
//! checker's own exit code when it fails; 2 on stampcheck errors.

use clap::Parser;

use stampcheck::commands::{self, CommandContext};
use stampcheck::presentation::CheckPyCli;

fn main() {
    let cli = CheckPyCli::parse();
    let result = CommandContext::init(cli.config.as_deref(), false, cli.verbose, false)
        .and_then(|ctx| commands::cmd_check(&ctx, &cli.args));
    std::process::exit(commands::finish(result, "check-py", false));
}
