//! Local filesystem key-value backend
//!
//! Stores each key as `<key>.json` inside a base directory (the platform
//! config directory by default). All operations complete immediately.

use super::{KvStore, StorageError, StorageHandle};
use std::path::PathBuf;

/// Local filesystem key-value store
#[derive(Debug, Clone)]
pub struct LocalStore {
    /// Directory holding one file per key
    base_dir: PathBuf,
}

impl LocalStore {
    /// Create a store rooted at the platform config directory
    #[cfg(not(target_arch = "wasm32"))]
    pub fn open_default() -> Self {
        let base_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("roomplan");
        Self { base_dir }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn open_default() -> Self {
        Self {
            base_dir: PathBuf::from("roomplan-data"),
        }
    }

    /// Create a store rooted at a custom directory (tests)
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", key))
    }
}

impl KvStore for LocalStore {
    fn get(&self, key: &str) -> StorageHandle<Option<String>> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(doc) => StorageHandle::ready(Some(doc)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => StorageHandle::ready(None),
            Err(e) => StorageHandle::error(StorageError::from(e)),
        }
    }

    fn put(&self, key: &str, value: &str) -> StorageHandle<()> {
        if let Err(e) = std::fs::create_dir_all(&self.base_dir) {
            return StorageHandle::error(StorageError::from(e));
        }
        match std::fs::write(self.path_for(key), value) {
            Ok(()) => StorageHandle::ready(()),
            Err(e) => StorageHandle::error(StorageError::from(e)),
        }
    }

    fn remove(&self, key: &str) -> StorageHandle<()> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => StorageHandle::ready(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // Removing an absent key is OK
                StorageHandle::ready(())
            }
            Err(e) => StorageHandle::error(StorageError::from(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{get_json, put_json};
    use tempfile::TempDir;

    fn setup_test_store() -> (TempDir, LocalStore) {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::with_base_dir(dir.path());
        (dir, store)
    }

    #[test]
    fn test_put_and_get() {
        let (_dir, store) = setup_test_store();

        let handle = store.put("layouts", "[1,2,3]");
        assert!(handle.take().unwrap().is_ok());

        let handle = store.get("layouts");
        assert_eq!(handle.take().unwrap().unwrap(), Some("[1,2,3]".to_string()));
    }

    #[test]
    fn test_get_missing_key() {
        let (_dir, store) = setup_test_store();

        let handle = store.get("nothing");
        assert_eq!(handle.take().unwrap().unwrap(), None);
    }

    #[test]
    fn test_remove() {
        let (dir, store) = setup_test_store();

        store.put("gone", "{}").take().unwrap().unwrap();
        assert!(dir.path().join("gone.json").exists());

        store.remove("gone").take().unwrap().unwrap();
        assert!(!dir.path().join("gone.json").exists());

        // Removing again is OK
        assert!(store.remove("gone").take().unwrap().is_ok());
    }

    #[test]
    fn test_json_round_trip() {
        let (_dir, store) = setup_test_store();

        let values = vec![50.0f32, 1.0, 0.0];
        put_json(&store, "grid", &values).unwrap();

        let loaded: Option<Vec<f32>> = get_json(&store, "grid").unwrap();
        assert_eq!(loaded, Some(values));
    }

    #[test]
    fn test_malformed_document_is_serde_error() {
        let (_dir, store) = setup_test_store();

        store.put("broken", "{not json").take().unwrap().unwrap();
        let result: Result<Option<Vec<f32>>, _> = get_json(&store, "broken");
        assert!(matches!(result, Err(StorageError::Serde(_))));
    }

    #[test]
    fn test_absent_key_deserializes_to_none() {
        let (_dir, store) = setup_test_store();
        let loaded: Option<Vec<f32>> = get_json(&store, "absent").unwrap();
        assert_eq!(loaded, None);
    }
}
