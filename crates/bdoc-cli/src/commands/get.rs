use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::GetArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `bdoc get <block>`.
pub async fn handle(args: &GetArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let block = ctx
        .pipeline
        .load_block(&args.block)
        .await
        .with_context(|| format!("failed to render block '{}'", args.block))?;
    output(&block, flags.format)
}
