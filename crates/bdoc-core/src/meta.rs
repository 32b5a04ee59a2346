//! Docs-facing metadata entries keyed by block name.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::JsonMap;

/// Descriptive metadata for one block, as kept in the docs metadata table.
///
/// Besides `description`, entries carry arbitrary annotations
/// (`iframeHeight`, `container`, ...) that the docs site reads verbatim.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct BlockMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: JsonMap,
}

impl BlockMeta {
    /// The full entry as an open map, `description` included.
    #[must_use]
    pub fn to_map(&self) -> JsonMap {
        let mut map = self.extra.clone();
        if let Some(description) = &self.description {
            map.insert(
                "description".to_string(),
                serde_json::Value::String(description.clone()),
            );
        }
        map
    }
}
