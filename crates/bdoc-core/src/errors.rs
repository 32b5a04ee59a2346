//! Cross-cutting error types for bdoc.
//!
//! Domain-specific errors (`SchemaError`, `RegistryError`, `HighlightError`)
//! live in their respective crates. They converge into `BlockError` in
//! `bdoc-blocks` and into `anyhow` in the CLI.

use thiserror::Error;

/// Errors raised while decoding or encoding core records.
#[derive(Debug, Error)]
pub enum CoreError {
    /// String is not one of the item-level `registry:*` kinds.
    #[error("unknown registry item type: {0}")]
    UnknownItemType(String),

    /// String is not one of the file-level `registry:*` kinds.
    #[error("unknown registry file type: {0}")]
    UnknownFileType(String),

    /// JSON value could not be converted to or from a typed record.
    #[error("record decode error: {0}")]
    Decode(#[from] serde_json::Error),
}
