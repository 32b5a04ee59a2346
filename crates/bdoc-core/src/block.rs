//! Highlighted block records returned to the docs site.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::JsonMap;
use crate::enums::{FileType, ItemType};

/// A registry item with every file's raw content replaced by rendered markup.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct HighlightedBlock {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<JsonMap>,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub files: Vec<HighlightedFile>,
}

/// A registry file after target resolution and highlighting.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct HighlightedFile {
    pub target: String,
    #[serde(rename = "type")]
    pub file_type: FileType,
    #[serde(rename = "highlightedContent")]
    pub highlighted_content: String,
    #[serde(flatten)]
    pub extra: JsonMap,
}

impl HighlightedFile {
    /// Output keys owned by the typed fields, plus the raw `content` that
    /// must never reach the output. Passthrough entries with these names are
    /// dropped.
    pub const RESERVED_KEYS: [&'static str; 4] = ["target", "type", "highlightedContent", "content"];

    /// Build a file from computed values and raw passthrough fields.
    ///
    /// The computed `target`, `type` and markup always win over same-named
    /// passthrough entries.
    #[must_use]
    pub fn new(
        target: String,
        file_type: FileType,
        highlighted_content: String,
        mut extra: JsonMap,
    ) -> Self {
        for key in Self::RESERVED_KEYS {
            extra.remove(key);
        }
        Self {
            target,
            file_type,
            highlighted_content,
            extra,
        }
    }
}
