use anyhow::Result;

use super::super::args::ListArgs;
use super::{CommandResult, CommandSummary, ListSummary};
use crate::core::MergeContext;

pub fn list(args: ListArgs) -> Result<CommandResult> {
    let ctx = MergeContext::new(&args.common)?;

    Ok(CommandResult {
        summary: CommandSummary::List(ListSummary {
            files: ctx.scan.files,
        }),
        missing_dirs: ctx.scan.missing_dirs,
        skipped_count: ctx.scan.skipped_count,
        events: Vec::new(),
    })
}
