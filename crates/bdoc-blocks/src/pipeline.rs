//! The block request pipeline.

use std::sync::Arc;
use std::time::Duration;

use bdoc_config::BdocConfig;
use bdoc_core::{BlockMeta, HighlightedBlock, RegistryItem};
use bdoc_highlight::{Highlighter, PlainHighlighter, language_hint};
use bdoc_registry::{MetadataTable, RegistryStore};
use bdoc_schema::SchemaRegistry;
use bdoc_transform::FileTransformer;

use crate::assemble::{HighlightLimits, PendingFile, highlight_files};
use crate::error::BlockError;

/// Default per-file highlight timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// Default number of concurrent highlight jobs per block.
pub const DEFAULT_MAX_CONCURRENCY: usize = 8;

/// Loads a block record and turns it into a [`HighlightedBlock`].
///
/// Every lookup table is an immutable value owned by the pipeline, so one
/// pipeline can serve concurrent requests through a shared reference.
pub struct BlockPipeline<S> {
    store: S,
    schemas: SchemaRegistry,
    transformer: FileTransformer,
    highlighter: Arc<dyn Highlighter>,
    metadata: MetadataTable,
    limits: HighlightLimits,
}

impl<S: RegistryStore> BlockPipeline<S> {
    /// Pipeline with no rewrite rules, no target directories, an empty
    /// metadata table and the plain highlighter.
    ///
    /// # Errors
    ///
    /// Returns `BlockError::Validation` if the schemas fail to compile.
    pub fn new(store: S) -> Result<Self, BlockError> {
        Ok(Self {
            store,
            schemas: SchemaRegistry::new()?,
            transformer: FileTransformer::default(),
            highlighter: Arc::new(PlainHighlighter),
            metadata: MetadataTable::default(),
            limits: HighlightLimits {
                timeout: DEFAULT_TIMEOUT,
                max_concurrency: DEFAULT_MAX_CONCURRENCY,
            },
        })
    }

    /// Pipeline wired from configuration.
    ///
    /// # Errors
    ///
    /// Returns `BlockError::Transform` for unusable rewrite rules and
    /// `BlockError::Load` if the metadata table cannot be read.
    pub fn from_config(store: S, config: &BdocConfig) -> Result<Self, BlockError> {
        let metadata = MetadataTable::from_config(&config.metadata).map_err(BlockError::Load)?;
        Ok(Self::new(store)?
            .with_transformer(FileTransformer::from_config(&config.transform)?)
            .with_highlighter(bdoc_highlight::from_config(&config.highlight))
            .with_metadata(metadata)
            .with_timeout(Duration::from_millis(config.highlight.timeout_ms))
            .with_max_concurrency(config.highlight.max_concurrency))
    }

    #[must_use]
    pub fn with_transformer(mut self, transformer: FileTransformer) -> Self {
        self.transformer = transformer;
        self
    }

    #[must_use]
    pub fn with_highlighter(mut self, highlighter: Arc<dyn Highlighter>) -> Self {
        self.highlighter = highlighter;
        self
    }

    #[must_use]
    pub fn with_metadata(mut self, metadata: MetadataTable) -> Self {
        self.metadata = metadata;
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.limits.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.limits.max_concurrency = max_concurrency;
        self
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Run the whole pipeline for one block identifier.
    ///
    /// Load → validate → transform each file → highlight all files
    /// concurrently → attach docs metadata → validate the output.
    ///
    /// The raw record's own `description` and `meta` are discarded: the
    /// metadata table entry for the item's name supplies both, and a missing
    /// entry leaves both unset.
    ///
    /// # Errors
    ///
    /// Returns the first [`BlockError`] hit at any stage; no partial block is
    /// ever produced.
    #[tracing::instrument(skip(self), fields(files))]
    pub async fn load_block(&self, block: &str) -> Result<HighlightedBlock, BlockError> {
        let raw = self
            .store
            .get(block)
            .await
            .map_err(|e| BlockError::from_registry(block, e))?;

        let RegistryItem {
            name,
            item_type,
            files,
            ..
        } = self.schemas.parse_item(raw)?;
        tracing::Span::current().record("files", files.len());
        tracing::debug!(%name, %item_type, "validated registry item");

        let pending = files
            .into_iter()
            .map(|file| PendingFile {
                language: language_hint(file.extension()),
                file: self.transformer.transform(item_type, file),
            })
            .collect();
        let files = highlight_files(pending, &self.highlighter, self.limits).await?;

        let entry = self.metadata.lookup(&name);
        let output = HighlightedBlock {
            name,
            description: entry.and_then(|meta| meta.description.clone()),
            meta: entry.map(BlockMeta::to_map),
            item_type,
            files,
        };
        self.schemas.check_block(&output)?;

        tracing::debug!(highlighter = self.highlighter.name(), "assembled block");
        Ok(output)
    }

    /// Every block identifier the store can serve.
    ///
    /// # Errors
    ///
    /// Returns `BlockError::Load` if the store cannot be enumerated.
    pub async fn list_blocks(&self) -> Result<Vec<String>, BlockError> {
        self.store.list().await.map_err(BlockError::Load)
    }
}
