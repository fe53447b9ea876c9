#![allow(dead_code)]

use async_trait::async_trait;
use pinvault_api_client::{PinError, PinListing, PinReceipt, Pinner};
use pinvault_core::{UploadFile, UploadMetadata};
use pinvault_storage::{BlobStore, StorageError, StorageResult};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::Notify;

pub fn png(name: &str, size: usize) -> UploadFile {
    UploadFile::new(name, "image/png", vec![7u8; size])
}

pub fn receipt(hash: &str) -> PinReceipt {
    PinReceipt {
        content_hash: hash.to_string(),
        pin_size_bytes: 0,
        server_timestamp: None,
        access_url: format!("https://gateway.pinata.cloud/ipfs/{}", hash),
    }
}

/// Pinner that answers every request with the same result.
pub struct StubPinner {
    result: Result<PinReceipt, PinError>,
    calls: AtomicUsize,
    seen: Mutex<Vec<(String, UploadMetadata)>>,
}

impl StubPinner {
    pub fn succeeding(hash: &str) -> Self {
        Self::with_result(Ok(receipt(hash)))
    }

    pub fn failing(error: PinError) -> Self {
        Self::with_result(Err(error))
    }

    fn with_result(result: Result<PinReceipt, PinError>) -> Self {
        Self {
            result,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// File names and metadata of every pin request, in order.
    pub fn seen(&self) -> Vec<(String, UploadMetadata)> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Pinner for StubPinner {
    async fn pin(
        &self,
        file: &UploadFile,
        metadata: &UploadMetadata,
    ) -> Result<PinReceipt, PinError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen
            .lock()
            .unwrap()
            .push((file.file_name.clone(), metadata.clone()));
        self.result.clone()
    }

    async fn lookup(&self, _content_hash: &str) -> Option<PinListing> {
        None
    }
}

/// Pinner that signals `started` and then waits for `release` before succeeding.
pub struct GatedPinner {
    pub started: Notify,
    pub release: Notify,
    calls: AtomicUsize,
}

impl GatedPinner {
    pub fn new() -> Self {
        Self {
            started: Notify::new(),
            release: Notify::new(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Pinner for GatedPinner {
    async fn pin(
        &self,
        file: &UploadFile,
        _metadata: &UploadMetadata,
    ) -> Result<PinReceipt, PinError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        self.started.notify_one();
        self.release.notified().await;
        Ok(receipt(&format!("QmGated{}{}", n, file.file_name)))
    }

    async fn lookup(&self, _content_hash: &str) -> Option<PinListing> {
        None
    }
}

/// Store whose reads find nothing and whose writes always fail.
pub struct ReadOnlyStore;

#[async_trait]
impl BlobStore for ReadOnlyStore {
    async fn get(&self, _key: &str) -> StorageResult<Option<String>> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &str) -> StorageResult<()> {
        Err(StorageError::WriteFailed("read-only store".to_string()))
    }

    async fn remove(&self, _key: &str) -> StorageResult<()> {
        Err(StorageError::WriteFailed("read-only store".to_string()))
    }
}
