use anyhow::Result;

use super::CommandContext;
use crate::application::GenerateOptions;
use crate::presentation::exit_code;
use crate::presentation::{create_generate_use_case, GenerateArgs};

pub fn cmd_generate(ctx: &CommandContext, args: &GenerateArgs) -> Result<i32> {
    let use_case = create_generate_use_case(&ctx.config, ctx.output_mode());

    let mut events = ctx.events("generate");
    if let Some(events) = events.as_mut() {
        events.start();
    }

    let report = use_case.execute(
        &args.descriptor,
        &args.output,
        GenerateOptions { force: args.force },
    )?;
    let code = exit_code::for_generate(&report);

    match events.as_mut() {
        Some(events) => {
            events.generate(&args.descriptor, &args.output, &report);
            events.complete(report.outcome.is_success(), code, report.duration);
        }
        None => {
            if let Some(line) = ctx.renderer().generate(&args.output, &report) {
                eprintln!("{}", line);
            }
        }
    }

    Ok(code)
}
