//! Docs metadata table: block name → [`BlockMeta`].

use std::collections::BTreeMap;
use std::path::Path;

use bdoc_config::MetadataConfig;
use bdoc_core::BlockMeta;

use crate::error::RegistryError;

/// Immutable lookup table of per-block docs metadata.
///
/// An entry, when present, is authoritative for a block's `description`
/// and `meta`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataTable {
    entries: BTreeMap<String, BlockMeta>,
}

impl MetadataTable {
    #[must_use]
    pub const fn new(entries: BTreeMap<String, BlockMeta>) -> Self {
        Self { entries }
    }

    /// Load from a `.toml` file, or a JSON file for any other extension.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::Io` if the file cannot be read, or
    /// `RegistryError::Metadata` if it is not a name → entry map.
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let text = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let is_toml = path.extension().and_then(|ext| ext.to_str()) == Some("toml");
        let parsed = if is_toml {
            toml::from_str(&text).map_err(|e| e.to_string())
        } else {
            serde_json::from_str(&text).map_err(|e| e.to_string())
        };
        let entries = parsed.map_err(|reason| RegistryError::Metadata {
            path: path.to_path_buf(),
            reason,
        })?;
        let table = Self::new(entries);
        tracing::debug!(path = %path.display(), entries = table.len(), "loaded metadata table");
        Ok(table)
    }

    /// Load the configured table, or an empty one when no path is set.
    ///
    /// # Errors
    ///
    /// See [`MetadataTable::load`].
    pub fn from_config(config: &MetadataConfig) -> Result<Self, RegistryError> {
        if config.is_configured() {
            Self::load(Path::new(&config.path))
        } else {
            Ok(Self::default())
        }
    }

    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&BlockMeta> {
        self.entries.get(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, BlockMeta)> for MetadataTable {
    fn from_iter<I: IntoIterator<Item = (String, BlockMeta)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn loads_json_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blocks.json");
        std::fs::write(
            &path,
            r#"{
                "sidebar-07": { "description": "A sidebar that collapses to icons.", "iframeHeight": "800px" },
                "login-01": {}
            }"#,
        )
        .unwrap();

        let table = MetadataTable::load(&path).unwrap();
        assert_eq!(table.len(), 2);
        let entry = table.lookup("sidebar-07").unwrap();
        assert_eq!(entry.description.as_deref(), Some("A sidebar that collapses to icons."));
        assert_eq!(entry.extra.get("iframeHeight"), Some(&json!("800px")));
        assert_eq!(table.lookup("login-01"), Some(&BlockMeta::default()));
        assert!(table.lookup("dashboard-01").is_none());
    }

    #[test]
    fn loads_toml_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blocks.toml");
        std::fs::write(
            &path,
            r#"
["sidebar-07"]
description = "A sidebar that collapses to icons."
container = "w-full"
"#,
        )
        .unwrap();

        let table = MetadataTable::load(&path).unwrap();
        let entry = table.lookup("sidebar-07").unwrap();
        assert_eq!(entry.extra.get("container"), Some(&json!("w-full")));
    }

    #[test]
    fn wrong_shape_is_metadata_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blocks.json");
        std::fs::write(&path, r#"["sidebar-07"]"#).unwrap();
        assert!(matches!(
            MetadataTable::load(&path),
            Err(RegistryError::Metadata { .. })
        ));
    }

    #[test]
    fn unconfigured_table_is_empty() {
        let table = MetadataTable::from_config(&MetadataConfig::default()).unwrap();
        assert!(table.is_empty());
    }
}
