//! Highlighting configuration.

use serde::{Deserialize, Serialize};

/// Default per-file highlight timeout in milliseconds.
const fn default_timeout_ms() -> u64 {
    10_000
}

/// Default number of files highlighted at once.
const fn default_max_concurrency() -> usize {
    8
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HighlightConfig {
    /// Per-file highlight timeout. Expiry fails the whole block.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Upper bound on in-flight highlight jobs for one block.
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// External highlighter command line. Source text is written to stdin and
    /// markup is read from stdout; `{lang}` in any argument is replaced by the
    /// language hint. Empty means the built-in plain-text renderer.
    #[serde(default)]
    pub command: Vec<String>,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            max_concurrency: default_max_concurrency(),
            command: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = HighlightConfig::default();
        assert_eq!(config.timeout_ms, 10_000);
        assert_eq!(config.max_concurrency, 8);
        assert!(config.command.is_empty());
    }
}
