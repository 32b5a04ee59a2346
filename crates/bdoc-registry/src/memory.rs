//! In-memory store.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::{RegistryStore, error::RegistryError};

/// Holds registry records in a map. Identifiers are not validated.
#[derive(Debug, Clone, Default)]
pub struct MemoryRegistryStore {
    records: BTreeMap<String, Value>,
}

impl MemoryRegistryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, record: Value) {
        self.records.insert(id.into(), record);
    }

    #[must_use]
    pub fn with(mut self, id: impl Into<String>, record: Value) -> Self {
        self.insert(id, record);
        self
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for MemoryRegistryStore {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl RegistryStore for MemoryRegistryStore {
    async fn get(&self, id: &str) -> Result<Value, RegistryError> {
        self.records
            .get(id)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))
    }

    async fn list(&self) -> Result<Vec<String>, RegistryError> {
        Ok(self.records.keys().cloned().collect())
    }
}
