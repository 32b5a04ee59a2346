//! # bdoc-highlight
//!
//! Turns source text plus a language hint into display-ready markup.
//!
//! Highlighters are synchronous and `Send + Sync`; callers that need
//! concurrency or timeouts run them on blocking worker threads.

mod command;
mod error;
mod language;
mod plain;

use std::sync::Arc;
use std::time::Duration;

use bdoc_config::HighlightConfig;

pub use command::{CommandHighlighter, LANG_PLACEHOLDER};
pub use error::HighlightError;
pub use language::{PLAIN_TEXT, detect_language, language_hint};
pub use plain::PlainHighlighter;

/// A syntax highlighting backend.
pub trait Highlighter: Send + Sync {
    /// Render `code` as markup for `language`.
    ///
    /// # Errors
    ///
    /// Returns a [`HighlightError`] if the backend cannot render the input.
    fn highlight(&self, code: &str, language: &str) -> Result<String, HighlightError>;

    /// Short backend name for logs.
    fn name(&self) -> &'static str;
}

impl<T: Highlighter + ?Sized> Highlighter for Arc<T> {
    fn highlight(&self, code: &str, language: &str) -> Result<String, HighlightError> {
        (**self).highlight(code, language)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Select the configured backend: an external command when one is set,
/// otherwise the built-in plain renderer.
///
/// External commands are killed once `timeout_ms` elapses.
#[must_use]
pub fn from_config(config: &HighlightConfig) -> Arc<dyn Highlighter> {
    match CommandHighlighter::new(&config.command) {
        Some(command) => {
            let command = command.with_timeout(Duration::from_millis(config.timeout_ms));
            tracing::debug!(program = command.program(), "using external highlighter");
            Arc::new(command)
        }
        None => Arc::new(PlainHighlighter),
    }
}
