//! Storage abstraction trait
//!
//! This module defines the BlobStore trait that all persistence backends implement.

use async_trait::async_trait;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Simple string key-value store.
///
/// Offers get/set/remove of whole string blobs with no transactions and no
/// cross-process consistency. A `set` replaces the previous value as a whole:
/// readers see either the old blob or the new one, never a partial write.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Read the blob stored under `key`, or `None` if nothing is stored.
    async fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Replace the blob stored under `key`.
    async fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove the blob stored under `key`. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> StorageResult<()>;
}

/// Validate a storage key.
pub fn validate_key(key: &str) -> StorageResult<()> {
    if key.is_empty() || key.contains("..") || key.contains('/') || key.contains('\\') {
        return Err(StorageError::InvalidKey(format!(
            "'{}' must be a non-empty flat name",
            key
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_flat_names() {
        assert!(validate_key("catalog").is_ok());
        assert!(validate_key("draft-2").is_ok());
    }

    #[test]
    fn rejects_path_like_keys() {
        assert!(validate_key("").is_err());
        assert!(validate_key("../catalog").is_err());
        assert!(validate_key("media/catalog").is_err());
        assert!(validate_key("a\\b").is_err());
    }
}
