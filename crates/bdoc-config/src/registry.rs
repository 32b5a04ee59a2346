//! Registry store configuration.

use serde::{Deserialize, Serialize};

/// Default directory holding `<block>.json` registry records.
fn default_root() -> String {
    String::from("__registry__/json")
}

/// Default HTTP request timeout in seconds.
const fn default_request_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RegistryConfig {
    /// Directory of the filesystem store. Ignored when `base_url` is set.
    #[serde(default = "default_root")]
    pub root: String,

    /// Base URL of a remote registry (e.g., `https://example.com/registry`).
    /// When non-empty, records are fetched over HTTP instead of from `root`.
    #[serde(default)]
    pub base_url: String,

    /// Request timeout for the HTTP store, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            base_url: String::new(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl RegistryConfig {
    /// Whether records should be fetched from a remote registry.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        !self.base_url.trim().is_empty()
    }
}
