//! # bdoc-blocks
//!
//! The block pipeline behind the docs block endpoint: given a block
//! identifier, load its registry record, validate it, rewrite each file for
//! consumer projects, highlight every file concurrently and return the
//! [`bdoc_core::HighlightedBlock`] served to the docs site.
//!
//! Fail-fast: any stage error aborts the request with a [`BlockError`].

mod assemble;
mod error;
mod pipeline;

pub use error::BlockError;
pub use pipeline::{BlockPipeline, DEFAULT_MAX_CONCURRENCY, DEFAULT_TIMEOUT};
