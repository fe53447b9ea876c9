//! Fixed endpoints, storage keys and limits.

/// Base URL of the Pinata REST API.
pub const DEFAULT_PINATA_API_URL: &str = "https://api.pinata.cloud";

/// Base URL of the public gateway used to build access URLs.
pub const DEFAULT_PINATA_GATEWAY_URL: &str = "https://gateway.pinata.cloud";

pub const PIN_FILE_PATH: &str = "/pinning/pinFileToIPFS";
pub const PIN_LIST_PATH: &str = "/data/pinList";

/// Storage key of the persisted catalog blob.
pub const CATALOG_KEY: &str = "catalog";

/// Storage key holding a catalog blob that could not be fully read, kept
/// before the catalog is rewritten.
pub const CATALOG_BACKUP_KEY: &str = "catalog.corrupt";

/// Storage key of the saved metadata draft.
pub const DRAFT_KEY: &str = "draft";

pub const DEFAULT_DATA_DIR: &str = ".pinvault";

/// Free tier storage allowance used for usage statistics.
pub const DEFAULT_STORAGE_LIMIT_MB: f64 = 1024.0;

/// Usage above this percentage is reported as near the limit.
pub const NEAR_LIMIT_PERCENT: f64 = 80.0;

/// Advisory upload ceiling. Larger files produce a warning, not a rejection.
pub const DEFAULT_MAX_UPLOAD_MB: u64 = 100;

pub const BYTES_PER_MB: f64 = 1024.0 * 1024.0;
