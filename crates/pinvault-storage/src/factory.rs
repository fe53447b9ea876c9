use crate::{BlobStore, FileStore, StorageResult};
use pinvault_core::LocalSettings;
use std::sync::Arc;

/// Open the persistent store described by `settings`.
pub async fn open_store(settings: &LocalSettings) -> StorageResult<Arc<dyn BlobStore>> {
    let store = FileStore::new(settings.data_dir.clone()).await?;
    tracing::debug!(data_dir = %settings.data_dir.display(), "Opened file store");
    Ok(Arc::new(store))
}
