use anyhow::Result;

use super::CommandContext;
use crate::application::CheckOptions;
use crate::domain::entities::CheckUnit;
use crate::presentation::exit_code;
use crate::presentation::{create_check_use_case, CheckArgs};

pub fn cmd_check(ctx: &CommandContext, args: &CheckArgs) -> Result<i32> {
    let unit = CheckUnit::new(&args.target, &args.stamp, &args.dep_file)
        .with_roots(&args.source_root, &args.lib_path);
    let use_case = create_check_use_case(&ctx.config, ctx.output_mode());

    let mut events = ctx.events("check");
    if let Some(events) = events.as_mut() {
        events.start();
    }

    let report = use_case.execute(&unit, CheckOptions { force: args.force })?;
    let code = exit_code::for_check(&report);

    match events.as_mut() {
        Some(events) => {
            events.check(&unit, &report);
            events.complete(report.is_success(), code, report.duration);
        }
        None => {
            if let Some(line) = ctx.renderer().check(&unit, &report) {
                eprintln!("{}", line);
            }
        }
    }

    Ok(code)
}
