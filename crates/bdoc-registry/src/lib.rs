//! # bdoc-registry
//!
//! Record loading for the block pipeline:
//! - [`RegistryStore`]: async access to raw registry records by identifier
//! - [`FsRegistryStore`], [`HttpRegistryStore`], [`MemoryRegistryStore`]
//! - [`MetadataTable`]: the docs-side block metadata lookup
//!
//! Stores return untyped JSON; structural validation happens downstream.

mod error;
mod fs;
mod http;
mod id;
mod memory;
mod metadata;

use std::future::Future;
use std::time::Duration;

use bdoc_config::RegistryConfig;
use serde_json::Value;

pub use error::RegistryError;
pub use fs::FsRegistryStore;
pub use http::{HttpRegistryStore, INDEX_FILE};
pub use id::validate_identifier;
pub use memory::MemoryRegistryStore;
pub use metadata::MetadataTable;

/// Source of raw registry records.
pub trait RegistryStore: Send + Sync {
    /// Fetch the raw record for `id`.
    ///
    /// Returns `RegistryError::NotFound` on a miss; every other error means
    /// the store could not be read.
    fn get(&self, id: &str) -> impl Future<Output = Result<Value, RegistryError>> + Send;

    /// Every identifier the store can serve, sorted.
    fn list(&self) -> impl Future<Output = Result<Vec<String>, RegistryError>> + Send;
}

/// The store selected by configuration.
#[derive(Debug, Clone)]
pub enum ConfiguredStore {
    Fs(FsRegistryStore),
    Http(HttpRegistryStore),
}

impl ConfiguredStore {
    /// Use the HTTP store when `base_url` is set, the filesystem store
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &RegistryConfig) -> Result<Self, RegistryError> {
        if config.is_remote() {
            let timeout = Duration::from_secs(config.request_timeout_secs);
            Ok(Self::Http(HttpRegistryStore::new(&config.base_url, timeout)?))
        } else {
            Ok(Self::Fs(FsRegistryStore::new(&config.root)))
        }
    }
}

impl RegistryStore for ConfiguredStore {
    async fn get(&self, id: &str) -> Result<Value, RegistryError> {
        match self {
            Self::Fs(store) => store.get(id).await,
            Self::Http(store) => store.get(id).await,
        }
    }

    async fn list(&self) -> Result<Vec<String>, RegistryError> {
        match self {
            Self::Fs(store) => store.list().await,
            Self::Http(store) => store.list().await,
        }
    }
}
