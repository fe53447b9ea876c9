//! Persisted catalog of upload records.

use crate::traits::{BlobStore, StorageResult};
use pinvault_core::constants::{CATALOG_BACKUP_KEY, CATALOG_KEY};
use pinvault_core::{compute_usage, UploadRecord, UsageStats};
use serde_json::Value;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

/// What must happen to the persisted blob before it is first rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Pending {
    Nothing,
    /// The blob was only partly understood; keep a copy of it.
    Preserve(String),
    /// The blob could not be read at all.
    Unread,
}

/// Ordered, append-only list of upload records with an owned in-memory snapshot.
///
/// The snapshot is read once by [`Catalog::load`]; every [`Catalog::append`]
/// rewrites the full sequence through the store. A persisted blob that was not
/// fully loaded is copied to [`CATALOG_BACKUP_KEY`] before the first rewrite.
pub struct Catalog {
    store: Arc<dyn BlobStore>,
    records: Vec<UploadRecord>,
    pending: Pending,
}

impl Debug for Catalog {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Catalog")
            .field("records", &self.records.len())
            .finish()
    }
}

/// Parse each element of a persisted array on its own, skipping the ones that
/// are not records.
fn parse_records(blob: &str) -> (Vec<UploadRecord>, Pending) {
    let values = match serde_json::from_str::<Vec<Value>>(blob) {
        Ok(values) => values,
        Err(e) => {
            tracing::warn!(
                error = %e,
                size_bytes = blob.len(),
                "Persisted catalog is malformed, starting with an empty catalog"
            );
            return (Vec::new(), Pending::Preserve(blob.to_string()));
        }
    };

    let total = values.len();
    let records: Vec<UploadRecord> = values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(index, error = %e, "Skipping unreadable catalog record");
                None
            }
        })
        .collect();

    let pending = if records.len() < total {
        Pending::Preserve(blob.to_string())
    } else {
        Pending::Nothing
    };
    (records, pending)
}

impl Catalog {
    /// Load the catalog from `store`.
    ///
    /// Never fails. Unreadable records are skipped, and a missing, unreadable
    /// or malformed blob yields an empty catalog.
    pub async fn load(store: Arc<dyn BlobStore>) -> Self {
        let (records, pending) = match store.get(CATALOG_KEY).await {
            Ok(Some(blob)) => parse_records(&blob),
            Ok(None) => (Vec::new(), Pending::Nothing),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "Failed to read persisted catalog, starting with an empty catalog"
                );
                (Vec::new(), Pending::Unread)
            }
        };

        tracing::debug!(records = records.len(), "Catalog loaded");
        Self {
            store,
            records,
            pending,
        }
    }

    pub fn records(&self) -> &[UploadRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append `record` and persist the full sequence.
    ///
    /// The in-memory snapshot only changes once the store write succeeded. A
    /// blob that could not be read at load time is read again and backed up
    /// first; if it still cannot be read, nothing is written.
    pub async fn append(&mut self, record: UploadRecord) -> StorageResult<()> {
        self.preserve_previous().await?;

        let mut next = Vec::with_capacity(self.records.len() + 1);
        next.extend_from_slice(&self.records);
        next.push(record);

        let blob = serde_json::to_string(&next)?;
        self.store.set(CATALOG_KEY, &blob).await?;
        self.records = next;

        tracing::info!(records = self.records.len(), "Catalog persisted");
        Ok(())
    }

    async fn preserve_previous(&mut self) -> StorageResult<()> {
        let previous = match &self.pending {
            Pending::Nothing => return Ok(()),
            Pending::Preserve(blob) => Some(blob.clone()),
            Pending::Unread => self.store.get(CATALOG_KEY).await?,
        };

        if let Some(blob) = previous {
            self.store.set(CATALOG_BACKUP_KEY, &blob).await?;
            tracing::warn!(
                key = CATALOG_BACKUP_KEY,
                size_bytes = blob.len(),
                "Kept a copy of the previous catalog before rewriting it"
            );
        }
        self.pending = Pending::Nothing;
        Ok(())
    }

    /// Usage statistics for the current snapshot.
    pub fn usage(&self, limit_mb: f64) -> UsageStats {
        compute_usage(&self.records, limit_mb)
    }
}
