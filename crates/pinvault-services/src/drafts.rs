//! Saved metadata forms.
//!
//! After a failed upload the form is kept so the next attempt can reuse it
//! without re-entering every field.

use pinvault_core::constants::DRAFT_KEY;
use pinvault_core::UploadMetadata;
use pinvault_storage::{BlobStore, StorageResult};
use std::sync::Arc;

#[derive(Clone)]
pub struct DraftStore {
    store: Arc<dyn BlobStore>,
}

impl DraftStore {
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self { store }
    }

    /// The saved draft, if any. A malformed draft is treated as absent.
    pub async fn load(&self) -> Option<UploadMetadata> {
        let blob = match self.store.get(DRAFT_KEY).await {
            Ok(blob) => blob?,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read metadata draft");
                return None;
            }
        };

        match serde_json::from_str(&blob) {
            Ok(metadata) => Some(metadata),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring malformed metadata draft");
                None
            }
        }
    }

    pub async fn save(&self, metadata: &UploadMetadata) -> StorageResult<()> {
        let blob = serde_json::to_string(metadata)?;
        self.store.set(DRAFT_KEY, &blob).await
    }

    pub async fn clear(&self) -> StorageResult<()> {
        self.store.remove(DRAFT_KEY).await
    }
}
