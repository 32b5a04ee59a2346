use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Render one block as highlighted JSON.
    Get(GetArgs),
    /// List block identifiers in the registry.
    List(ListArgs),
    /// Render every block into a directory of JSON files.
    Prerender(PrerenderArgs),
    /// Print a JSON Schema used for validation.
    Schema(SchemaArgs),
}

#[derive(Clone, Debug, Args)]
pub struct GetArgs {
    /// Block identifier (e.g. `sidebar-07`).
    pub block: String,
}

#[derive(Clone, Debug, Args)]
pub struct ListArgs {
    /// Only list items of this registry type (e.g. `registry:block`).
    #[arg(short = 't', long = "type")]
    pub item_type: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct PrerenderArgs {
    /// Output directory; one `<block>.json` is written per block.
    #[arg(short, long)]
    pub out: PathBuf,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Schema name (`registry_item`, `highlighted_block`). Lists names when omitted.
    pub name: Option<String>,
}
