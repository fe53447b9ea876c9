use crate::traits::{validate_key, BlobStore, StorageError, StorageResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-process store. Contents are lost when the value is dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `value` under `key`.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.into(), value.into());
        Self {
            entries: RwLock::new(entries),
        }
    }
}

fn poisoned<E>(_: E) -> StorageError {
    StorageError::IoError(std::io::Error::other("memory store lock poisoned"))
}

#[async_trait]
impl BlobStore for MemoryStore {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        validate_key(key)?;
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        validate_key(key)?;
        let mut entries = self.entries.write().map_err(poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        validate_key(key)?;
        let mut entries = self.entries.write().map_err(poisoned)?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_get_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get("catalog").await.unwrap(), None);

        store.set("catalog", "[]").await.unwrap();
        assert_eq!(store.get("catalog").await.unwrap().as_deref(), Some("[]"));

        store.remove("catalog").await.unwrap();
        assert_eq!(store.get("catalog").await.unwrap(), None);
        store.remove("catalog").await.unwrap();
    }

    #[tokio::test]
    async fn rejects_invalid_keys() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.set("../x", "1").await,
            Err(StorageError::InvalidKey(_))
        ));
    }
}
