//! # bdoc-schema
//!
//! Structural validation of registry records for bdoc.
//!
//! This crate provides:
//! - `SchemaRegistry`: named JSON Schemas generated from `bdoc-core` types,
//!   compiled once and reused for every validation
//! - The input check (`registry_item`) run on untrusted records before any
//!   transformation
//! - The output check (`highlighted_block`) run on the pipeline's own result
//!
//! Validation is structural only. Unknown keys on files are allowed and passed
//! through; business semantics are not checked.

mod error;
mod registry;

pub use error::SchemaError;
pub use registry::{HIGHLIGHTED_BLOCK, REGISTRY_ITEM, SchemaRegistry};
