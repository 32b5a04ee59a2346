mod config_warnings;

use anyhow::Context;
use bdoc_blocks::BlockPipeline;
use bdoc_config::BdocConfig;
use bdoc_registry::ConfiguredStore;

pub use config_warnings::warn_unconfigured;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub pipeline: BlockPipeline<ConfiguredStore>,
}

impl AppContext {
    /// Build the configured store and the block pipeline.
    pub fn init(config: &BdocConfig) -> anyhow::Result<Self> {
        let store = ConfiguredStore::from_config(&config.registry)
            .context("failed to initialize registry store")?;
        match &store {
            ConfiguredStore::Fs(fs) => {
                tracing::debug!(root = %fs.root().display(), "using filesystem registry");
            }
            ConfiguredStore::Http(http) => {
                tracing::debug!(base_url = http.base_url(), "using remote registry");
            }
        }

        let pipeline = BlockPipeline::from_config(store, config)
            .context("failed to initialize block pipeline")?;
        Ok(Self { pipeline })
    }
}
