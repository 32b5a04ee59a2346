//! Item-level and file-level registry kinds.
//!
//! Both enums serialize as their `registry:`-prefixed wire strings. The
//! file-level set is a strict subset of the item-level set: `internal`,
//! `block` and `example` only ever describe whole items.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// ItemType
// ---------------------------------------------------------------------------

/// Kind of a registry item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum ItemType {
    #[serde(rename = "registry:file")]
    File,
    #[serde(rename = "registry:page")]
    Page,
    #[serde(rename = "registry:ui")]
    Ui,
    #[serde(rename = "registry:component")]
    Component,
    #[serde(rename = "registry:lib")]
    Lib,
    #[serde(rename = "registry:hook")]
    Hook,
    #[serde(rename = "registry:theme")]
    Theme,
    #[serde(rename = "registry:style")]
    Style,
    #[serde(rename = "registry:internal")]
    Internal,
    #[serde(rename = "registry:block")]
    Block,
    #[serde(rename = "registry:example")]
    Example,
}

impl ItemType {
    pub const ALL: [Self; 11] = [
        Self::File,
        Self::Page,
        Self::Ui,
        Self::Component,
        Self::Lib,
        Self::Hook,
        Self::Theme,
        Self::Style,
        Self::Internal,
        Self::Block,
        Self::Example,
    ];

    /// Return the wire representation (`registry:<kind>`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::File => "registry:file",
            Self::Page => "registry:page",
            Self::Ui => "registry:ui",
            Self::Component => "registry:component",
            Self::Lib => "registry:lib",
            Self::Hook => "registry:hook",
            Self::Theme => "registry:theme",
            Self::Style => "registry:style",
            Self::Internal => "registry:internal",
            Self::Block => "registry:block",
            Self::Example => "registry:example",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| CoreError::UnknownItemType(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// FileType
// ---------------------------------------------------------------------------

/// Kind of a single file inside a registry item.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum FileType {
    #[serde(rename = "registry:file")]
    File,
    #[serde(rename = "registry:page")]
    Page,
    #[serde(rename = "registry:ui")]
    Ui,
    #[serde(rename = "registry:component")]
    Component,
    #[serde(rename = "registry:lib")]
    Lib,
    #[serde(rename = "registry:hook")]
    Hook,
    #[serde(rename = "registry:theme")]
    Theme,
    #[serde(rename = "registry:style")]
    Style,
}

impl FileType {
    pub const ALL: [Self; 8] = [
        Self::File,
        Self::Page,
        Self::Ui,
        Self::Component,
        Self::Lib,
        Self::Hook,
        Self::Theme,
        Self::Style,
    ];

    /// Return the wire representation (`registry:<kind>`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::File => "registry:file",
            Self::Page => "registry:page",
            Self::Ui => "registry:ui",
            Self::Component => "registry:component",
            Self::Lib => "registry:lib",
            Self::Hook => "registry:hook",
            Self::Theme => "registry:theme",
            Self::Style => "registry:style",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| CoreError::UnknownFileType(s.to_string()))
    }
}
