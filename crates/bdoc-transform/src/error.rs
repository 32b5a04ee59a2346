//! Transformer construction errors.

use thiserror::Error;

/// Errors raised while compiling rewrite rules or target directory maps.
///
/// Transformation itself is infallible: it operates on validated, typed
/// records.
#[derive(Debug, Error)]
pub enum TransformError {
    /// An import rule is structurally unusable.
    #[error("invalid import rule `{from}` -> `{to}`: {reason}")]
    InvalidRule {
        from: String,
        to: String,
        reason: String,
    },

    /// The output of one rule could be matched again by another, so
    /// rewriting would not be idempotent.
    #[error("import rule `{from}` would re-match output prefix `{output}`")]
    NonIdempotentRules { from: String, output: String },

    /// A target directory map key is not a file-level registry kind.
    #[error("target directory for {0}")]
    UnknownFileType(#[from] bdoc_core::CoreError),
}
