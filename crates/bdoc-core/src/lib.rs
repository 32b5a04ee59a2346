//! # bdoc-core
//!
//! Core types shared across all bdoc crates:
//! - Registry item and registry file records as read from the registry store
//! - Highlighted block records returned to the docs site
//! - Item-level and file-level kind enums (`registry:*` wire strings)
//! - Block metadata entries from the docs metadata table
//! - Cross-cutting error types

pub mod block;
pub mod enums;
pub mod errors;
pub mod item;
pub mod meta;

pub use block::{HighlightedBlock, HighlightedFile};
pub use enums::{FileType, ItemType};
pub use errors::CoreError;
pub use item::{RegistryFile, RegistryItem};
pub use meta::BlockMeta;

/// Open map used for passthrough fields and free-form metadata.
pub type JsonMap = serde_json::Map<String, serde_json::Value>;
