//! Schema validation error types.

use thiserror::Error;

/// Errors from the schema registry.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Requested schema name was not found in the registry.
    #[error("Schema not found: {0}")]
    NotFound(String),

    /// JSON value did not pass schema validation.
    #[error("{schema} validation failed: {}", .errors.join("; "))]
    ValidationFailed {
        /// Name of the schema the value was checked against.
        schema: &'static str,
        /// Individual error messages from the validator.
        errors: Vec<String>,
    },

    /// A validated value could not be converted to or from its typed record.
    #[error(transparent)]
    Decode(#[from] bdoc_core::CoreError),

    /// Schema generation or compilation error.
    #[error("Schema generation error: {0}")]
    Generation(String),
}
