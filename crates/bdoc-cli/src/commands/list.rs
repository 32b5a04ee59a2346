use anyhow::Context;
use bdoc_core::ItemType;
use bdoc_registry::RegistryStore;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ListArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `bdoc list [--type <registry:kind>]`.
///
/// Filtering reads each raw record's `type`; records that cannot be read
/// are skipped with a warning.
pub async fn handle(args: &ListArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let wanted = args
        .item_type
        .as_deref()
        .map(str::parse::<ItemType>)
        .transpose()
        .context("invalid --type")?;

    let ids = ctx
        .pipeline
        .list_blocks()
        .await
        .context("failed to list registry blocks")?;

    let Some(wanted) = wanted else {
        return output(&ids, flags.format);
    };

    let mut matching = Vec::new();
    for id in ids {
        match ctx.pipeline.store().get(&id).await {
            Ok(record) if record.get("type").and_then(|t| t.as_str()) == Some(wanted.as_str()) => {
                matching.push(id);
            }
            Ok(_) => {}
            Err(error) => tracing::warn!(block = %id, %error, "skipping unreadable record"),
        }
    }
    output(&matching, flags.format)
}
