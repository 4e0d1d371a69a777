use std::time::Instant;

use anyhow::Result;

use super::CommandContext;
use crate::domain::entities::CheckUnit;
use crate::presentation::exit_code;
use crate::presentation::{create_check_use_case, StatusArgs};

pub fn cmd_status(ctx: &CommandContext, args: &StatusArgs) -> Result<i32> {
    let start = Instant::now();
    let unit = CheckUnit::new(&args.target, &args.stamp, &args.dep_file);
    let use_case = create_check_use_case(&ctx.config, ctx.output_mode());

    let mut events = ctx.events("status");
    if let Some(events) = events.as_mut() {
        events.start();
    }

    let freshness = use_case.plan(&unit)?;
    let code = exit_code::for_status(&freshness);

    match events.as_mut() {
        Some(events) => {
            events.status(&unit, &freshness);
            events.complete(true, code, start.elapsed());
        }
        None => println!("{}", ctx.renderer().status(&unit, &freshness)),
    }

    Ok(code)
}
