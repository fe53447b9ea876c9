//! Pinvault services: the upload workflow and its supporting pieces.

pub mod drafts;
pub mod source;
pub mod workflow;

pub use drafts::DraftStore;
pub use source::read_upload_file;
pub use workflow::{UploadOutcome, UploadWorkflow, WorkflowError, WorkflowState};
