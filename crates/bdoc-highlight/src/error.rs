//! Highlighter error types.

/// Errors produced while rendering one file.
#[derive(Debug, thiserror::Error)]
pub enum HighlightError {
    #[error("highlighting failed for {language}: {message}")]
    Failed { language: String, message: String },

    #[error("highlighter did not finish within {timeout_ms}ms")]
    TimedOut { timeout_ms: u64 },

    /// The highlight job was cancelled or panicked.
    #[error("highlight job aborted: {0}")]
    Aborted(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
