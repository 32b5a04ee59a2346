use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::PrerenderArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct PrerenderSummary {
    out: PathBuf,
    blocks: usize,
}

/// Handle `bdoc prerender --out <dir>`.
///
/// Renders every block in the store and writes `<dir>/<block>.json`.
/// Stops at the first failing block.
pub async fn handle(
    args: &PrerenderArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let ids = ctx
        .pipeline
        .list_blocks()
        .await
        .context("failed to list registry blocks")?;

    for id in &ids {
        let block = ctx
            .pipeline
            .load_block(id)
            .await
            .with_context(|| format!("failed to render block '{id}'"))?;
        let path = output_path(&args.out, id);
        write_json(&path, &serde_json::to_vec(&block)?).await?;
        tracing::info!(block = %id, path = %path.display(), "prerendered block");
    }

    output(
        &PrerenderSummary {
            out: args.out.clone(),
            blocks: ids.len(),
        },
        flags.format,
    )
}

fn output_path(out: &Path, id: &str) -> PathBuf {
    out.join(format!("{id}.json"))
}

async fn write_json(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    tokio::fs::write(path, bytes)
        .await
        .with_context(|| format!("failed to write {}", path.display()))
}
