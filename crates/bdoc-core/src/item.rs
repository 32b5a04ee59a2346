//! Registry item records as stored in the registry.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::JsonMap;
use crate::enums::{FileType, ItemType};
use crate::errors::CoreError;

/// One catalog entry describing a set of source files for consumers to copy.
///
/// Unknown top-level keys (`dependencies`, `registryDependencies`, `$schema`,
/// ...) are accepted and dropped on deserialization.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct RegistryItem {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<JsonMap>,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub files: Vec<RegistryFile>,
}

/// A single source file inside a registry item.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct RegistryFile {
    /// Destination path, extension-bearing (e.g. `components/ui/button.svelte`).
    pub target: String,
    #[serde(rename = "type")]
    pub file_type: FileType,
    /// Raw source text.
    pub content: String,
    /// Passthrough fields preserved verbatim.
    #[serde(flatten)]
    pub extra: JsonMap,
}

impl RegistryItem {
    /// Decode an already-validated JSON value into a typed item.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Decode` if the value does not match the item shape.
    pub fn from_value(value: serde_json::Value) -> Result<Self, CoreError> {
        serde_json::from_value(value).map_err(CoreError::from)
    }
}

impl RegistryFile {
    /// File extension of `target` without the dot, or `""` when there is none.
    ///
    /// Only the final path segment is inspected, so `lib.d/readme` has no
    /// extension and `.gitignore` is treated as a bare dotfile.
    #[must_use]
    pub fn extension(&self) -> &str {
        let base = self.target.rsplit('/').next().unwrap_or_default();
        match base.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => ext,
            _ => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn file(target: &str) -> RegistryFile {
        RegistryFile {
            target: target.into(),
            file_type: FileType::Component,
            content: String::new(),
            extra: JsonMap::new(),
        }
    }

    #[test]
    fn decodes_item_and_keeps_file_passthrough() {
        let value = json!({
            "$schema": "https://shadcn-svelte.com/schema/registry-item.json",
            "name": "sidebar-01",
            "type": "registry:block",
            "registryDependencies": ["sidebar"],
            "files": [{
                "target": "app-sidebar.svelte",
                "type": "registry:component",
                "content": "<script></script>",
                "path": "blocks/sidebar-01/components/app-sidebar.svelte"
            }]
        });

        let item = RegistryItem::from_value(value).unwrap();
        assert_eq!(item.name, "sidebar-01");
        assert_eq!(item.item_type, ItemType::Block);
        assert_eq!(item.description, None);
        assert_eq!(item.files.len(), 1);
        assert_eq!(
            item.files[0].extra.get("path"),
            Some(&json!("blocks/sidebar-01/components/app-sidebar.svelte"))
        );
        assert!(!item.files[0].extra.contains_key("content"));
    }

    #[test]
    fn decode_rejects_item_only_kind_on_file() {
        let value = json!({
            "name": "x",
            "type": "registry:block",
            "files": [{ "target": "a.ts", "type": "registry:block", "content": "" }]
        });
        assert!(matches!(
            RegistryItem::from_value(value),
            Err(CoreError::Decode(_))
        ));
    }

    #[test]
    fn extension_of_nested_target() {
        assert_eq!(file("components/ui/button.svelte").extension(), "svelte");
        assert_eq!(file("use-foo.ts").extension(), "ts");
        assert_eq!(file("lib/utils.d.ts").extension(), "ts");
    }

    #[test]
    fn extension_missing() {
        assert_eq!(file("Makefile").extension(), "");
        assert_eq!(file("config.d/readme").extension(), "");
        assert_eq!(file(".gitignore").extension(), "");
        assert_eq!(file("").extension(), "");
    }
}
