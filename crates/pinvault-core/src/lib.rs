//! Pinvault Core Library
//!
//! This crate provides the domain models, configuration, upload acceptance rules
//! and usage statistics shared by the storage, client, service and CLI crates.

pub mod config;
pub mod constants;
pub mod format;
pub mod models;
pub mod usage;
pub mod validation;

// Re-export commonly used types
pub use config::{ConfigError, LocalSettings, PinataCredentials, PinataSettings, PinvaultConfig};
pub use format::format_file_size;
pub use models::{
    ContentKind, MediaCategory, SloganDetails, UploadFile, UploadMetadata, UploadRecord,
};
pub use usage::{compute_usage, UsageStats};
pub use validation::{AcceptanceError, UploadPolicy};
