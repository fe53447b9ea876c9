//! Pinvault Storage Library
//!
//! This crate provides the key-value blob abstraction that holds persisted
//! state, its file and in-memory implementations, and the [`Catalog`] of
//! upload records built on top of it.
//!
//! # Key format
//!
//! Keys are flat names such as `catalog` or `draft`. They must not be empty,
//! contain `/`, `\` or `..`. The file backend stores each key as
//! `{data_dir}/{key}.json`.

pub mod catalog;
pub mod factory;
pub mod file;
pub mod memory;
pub mod traits;

// Re-export commonly used types
pub use catalog::Catalog;
pub use factory::open_store;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use traits::{validate_key, BlobStore, StorageError, StorageResult};
