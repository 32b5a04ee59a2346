//! Pipeline error taxonomy.

use bdoc_highlight::HighlightError;
use bdoc_registry::RegistryError;
use bdoc_schema::SchemaError;
use bdoc_transform::TransformError;
use thiserror::Error;

/// Every way a block request can fail. There are no partial results.
#[derive(Debug, Error)]
pub enum BlockError {
    /// The identifier has no registry record.
    #[error("block `{block}` not found")]
    NotFound { block: String },

    /// Input or output failed structural checks.
    #[error(transparent)]
    Validation(#[from] SchemaError),

    /// The highlighter failed, panicked or timed out on one file.
    #[error("failed to highlight `{target}`: {source}")]
    Highlight {
        target: String,
        #[source]
        source: HighlightError,
    },

    /// The store or metadata table could not be read.
    #[error("failed to load registry data: {0}")]
    Load(#[source] RegistryError),

    /// The configured rewrite rules or target directories are unusable.
    #[error("invalid transform configuration: {0}")]
    Transform(#[from] TransformError),
}

impl BlockError {
    /// Classify a store failure for `block`: misses become `NotFound`.
    #[must_use]
    pub fn from_registry(block: &str, err: RegistryError) -> Self {
        if err.is_not_found() {
            Self::NotFound {
                block: block.to_string(),
            }
        } else {
            Self::Load(err)
        }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
