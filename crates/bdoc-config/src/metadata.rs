//! Block metadata table configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MetadataConfig {
    /// Path to a JSON or TOML file mapping block names to metadata entries.
    /// Empty means an empty table: every block renders without description/meta.
    #[serde(default)]
    pub path: String,
}

impl MetadataConfig {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.path.is_empty()
    }
}
