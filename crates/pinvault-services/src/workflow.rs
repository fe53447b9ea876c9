//! Upload workflow: Idle → Uploading → Settled(success | failure).
//!
//! One upload may be in flight per workflow. While it is, further submissions
//! are rejected with [`WorkflowError::Busy`], which also serializes every
//! catalog append. Settled is left for Idle by [`UploadWorkflow::acknowledge`]
//! or by the next submission.

use chrono::Utc;
use pinvault_api_client::Pinner;
use pinvault_core::{
    AcceptanceError, UploadFile, UploadMetadata, UploadPolicy, UploadRecord, UsageStats,
};
use pinvault_storage::Catalog;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowState {
    Idle,
    Uploading { file_name: String },
    Settled(UploadOutcome),
}

/// Result of one upload attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// Pinned and recorded in the catalog.
    Pinned(UploadRecord),
    /// Nothing was recorded; `message` is suitable for display.
    Failed { message: String },
}

impl UploadOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, UploadOutcome::Pinned(_))
    }
}

/// Reasons a submission is refused before any request is made.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkflowError {
    #[error("An upload is already in progress")]
    Busy,

    #[error("No file was supplied")]
    NoFile,

    #[error(transparent)]
    Rejected(#[from] AcceptanceError),
}

pub struct UploadWorkflow {
    pinner: Arc<dyn Pinner>,
    catalog: tokio::sync::Mutex<Catalog>,
    form: Mutex<UploadMetadata>,
    state: Mutex<WorkflowState>,
    policy: UploadPolicy,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Returns the workflow to Idle if an upload is abandoned before it settles.
struct InFlight<'a> {
    state: &'a Mutex<WorkflowState>,
    settled: bool,
}

impl InFlight<'_> {
    fn settle(mut self, outcome: UploadOutcome) {
        *lock(self.state) = WorkflowState::Settled(outcome);
        self.settled = true;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.settled {
            *lock(self.state) = WorkflowState::Idle;
        }
    }
}

impl UploadWorkflow {
    pub fn new(pinner: Arc<dyn Pinner>, catalog: Catalog, policy: UploadPolicy) -> Self {
        Self {
            pinner,
            catalog: tokio::sync::Mutex::new(catalog),
            form: Mutex::new(UploadMetadata::default()),
            state: Mutex::new(WorkflowState::Idle),
            policy,
        }
    }

    pub fn state(&self) -> WorkflowState {
        lock(&self.state).clone()
    }

    pub fn is_uploading(&self) -> bool {
        matches!(*lock(&self.state), WorkflowState::Uploading { .. })
    }

    /// Return to Idle once a settled outcome has been shown.
    pub fn acknowledge(&self) {
        let mut state = lock(&self.state);
        if matches!(*state, WorkflowState::Settled(_)) {
            *state = WorkflowState::Idle;
        }
    }

    /// Current contents of the metadata form.
    pub fn form(&self) -> UploadMetadata {
        lock(&self.form).clone()
    }

    pub fn set_form(&self, metadata: UploadMetadata) {
        *lock(&self.form) = metadata;
    }

    pub async fn records(&self) -> Vec<UploadRecord> {
        self.catalog.lock().await.records().to_vec()
    }

    pub async fn usage(&self, limit_mb: f64) -> UsageStats {
        self.catalog.lock().await.usage(limit_mb)
    }

    /// Upload the first of `files` with the current form.
    ///
    /// Additional files are ignored. Returns `Err` only when the submission is
    /// refused up front; pin and persistence failures come back as
    /// [`UploadOutcome::Failed`] and leave the form untouched.
    pub async fn submit(&self, files: Vec<UploadFile>) -> Result<UploadOutcome, WorkflowError> {
        let mut files = files.into_iter();
        let file = files.next().ok_or(WorkflowError::NoFile)?;
        let ignored = files.count();

        {
            let mut state = lock(&self.state);
            if matches!(*state, WorkflowState::Uploading { .. }) {
                tracing::debug!(file_name = %file.file_name, "Upload rejected, another is in flight");
                return Err(WorkflowError::Busy);
            }
            self.policy.check_type(&file.file_name, &file.file_type)?;
            *state = WorkflowState::Uploading {
                file_name: file.file_name.clone(),
            };
        }
        let in_flight = InFlight {
            state: &self.state,
            settled: false,
        };

        if ignored > 0 {
            tracing::info!(
                ignored,
                file_name = %file.file_name,
                "Only the first file is uploaded, ignoring the rest"
            );
        }
        if let Some(advisory) = self.policy.size_advisory(file.size()) {
            tracing::warn!(file_name = %file.file_name, size_bytes = file.size(), "{}", advisory);
        }

        let metadata = self.form();
        let outcome = match self.pinner.pin(&file, &metadata).await {
            Ok(receipt) => {
                let record = UploadRecord {
                    file_size: file.size(),
                    file_name: file.file_name,
                    file_type: file.file_type,
                    content_hash: receipt.content_hash,
                    access_url: receipt.access_url,
                    upload_timestamp: Utc::now(),
                    metadata,
                };

                let mut catalog = self.catalog.lock().await;
                match catalog.append(record.clone()).await {
                    Ok(()) => {
                        self.set_form(UploadMetadata::default());
                        tracing::info!(
                            content_hash = %record.content_hash,
                            file_name = %record.file_name,
                            records = catalog.len(),
                            "Upload recorded"
                        );
                        UploadOutcome::Pinned(record)
                    }
                    Err(e) => {
                        tracing::error!(
                            content_hash = %record.content_hash,
                            error = %e,
                            "Pinned but failed to persist catalog"
                        );
                        UploadOutcome::Failed {
                            message: format!(
                                "Pinned as {} but the catalog could not be saved: {}",
                                record.content_hash, e
                            ),
                        }
                    }
                }
            }
            Err(e) => UploadOutcome::Failed {
                message: e.to_string(),
            },
        };

        in_flight.settle(outcome.clone());
        Ok(outcome)
    }
}
