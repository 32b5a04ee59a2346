//! Filesystem store: one `<root>/<identifier>.json` file per block.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::{RegistryStore, error::RegistryError, id::validate_identifier};

/// Reads registry records from a directory tree.
#[derive(Debug, Clone)]
pub struct FsRegistryStore {
    root: PathBuf,
}

impl FsRegistryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn record_path(&self, id: &str) -> PathBuf {
        self.root.join(format!("{id}.json"))
    }
}

impl RegistryStore for FsRegistryStore {
    async fn get(&self, id: &str) -> Result<Value, RegistryError> {
        validate_identifier(id)?;
        let path = self.record_path(id);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(RegistryError::NotFound(id.to_string()));
            }
            Err(source) => return Err(RegistryError::Io { path, source }),
        };
        serde_json::from_slice(&bytes).map_err(|source| RegistryError::Malformed {
            id: id.to_string(),
            source,
        })
    }

    async fn list(&self) -> Result<Vec<String>, RegistryError> {
        let mut ids = Vec::new();
        let mut pending = vec![self.root.clone()];

        while let Some(dir) = pending.pop() {
            let io_err = |source| RegistryError::Io {
                path: dir.clone(),
                source,
            };
            let mut entries = tokio::fs::read_dir(&dir).await.map_err(io_err)?;
            while let Some(entry) = entries.next_entry().await.map_err(io_err)? {
                let path = entry.path();
                let file_type = entry.file_type().await.map_err(io_err)?;
                if file_type.is_dir() {
                    pending.push(path);
                } else if let Some(id) = self.identifier_of(&path) {
                    ids.push(id);
                }
            }
        }

        ids.sort_unstable();
        Ok(ids)
    }
}

impl FsRegistryStore {
    /// Derive the identifier addressed by a `.json` file under the root.
    fn identifier_of(&self, path: &Path) -> Option<String> {
        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            return None;
        }
        let relative = path.strip_prefix(&self.root).ok()?.with_extension("");
        let segments: Option<Vec<&str>> = relative
            .components()
            .map(|component| component.as_os_str().to_str())
            .collect();
        let id = segments?.join("/");
        match validate_identifier(&id) {
            Ok(()) => Some(id),
            Err(e) => {
                tracing::debug!(path = %path.display(), %e, "skipping unaddressable record");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn write(root: &Path, relative: &str, body: &str) {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, body).unwrap();
    }

    #[tokio::test]
    async fn get_reads_record() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "login-01.json", r#"{"name":"login-01"}"#);

        let store = FsRegistryStore::new(dir.path());
        assert_eq!(store.get("login-01").await.unwrap(), json!({"name": "login-01"}));
    }

    #[tokio::test]
    async fn missing_record_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = FsRegistryStore::new(dir.path()).get("nope").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn invalid_json_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "broken.json", "{ not json");
        let err = FsRegistryStore::new(dir.path()).get("broken").await.unwrap_err();
        assert!(matches!(err, RegistryError::Malformed { ref id, .. } if id == "broken"));
    }

    #[tokio::test]
    async fn traversal_never_touches_disk() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "secret.json", "{}");
        let store = FsRegistryStore::new(dir.path().join("json"));
        let err = store.get("../secret").await.unwrap_err();
        assert!(matches!(err, RegistryError::InvalidIdentifier { .. }));
    }

    #[tokio::test]
    async fn list_is_recursive_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "sidebar-07.json", "{}");
        write(dir.path(), "charts/area-chart.json", "{}");
        write(dir.path(), "login-01.json", "{}");
        write(dir.path(), "README.md", "ignored");
        write(dir.path(), "bad name.json", "{}");

        let ids = FsRegistryStore::new(dir.path()).list().await.unwrap();
        assert_eq!(ids, vec!["charts/area-chart", "login-01", "sidebar-07"]);
    }

    #[tokio::test]
    async fn list_missing_root_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FsRegistryStore::new(dir.path().join("absent"))
            .list()
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::Io { .. }));
    }
}
