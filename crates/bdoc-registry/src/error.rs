//! Registry store error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading registry records or the metadata table.
///
/// Everything except [`RegistryError::NotFound`] means the store could not
/// produce a usable record.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// No record exists for the identifier.
    #[error("no registry record for `{0}`")]
    NotFound(String),

    /// The identifier cannot address a record in any store.
    #[error("invalid block identifier `{id}`: {reason}")]
    InvalidIdentifier { id: String, reason: &'static str },

    /// Filesystem access failed.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The stored bytes are not a JSON document.
    #[error("record `{id}` is not valid JSON: {source}")]
    Malformed {
        id: String,
        #[source]
        source: serde_json::Error,
    },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Remote registry returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the registry.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The remote registry returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// The metadata table file could not be parsed.
    #[error("invalid metadata table {}: {reason}", path.display())]
    Metadata { path: PathBuf, reason: String },
}

impl RegistryError {
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
