//! Storage usage statistics over the catalog.

use serde::Serialize;

use crate::constants::{BYTES_PER_MB, NEAR_LIMIT_PERCENT};
use crate::models::UploadRecord;

/// Aggregate usage of the catalog against a storage allowance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UsageStats {
    pub asset_count: usize,
    pub total_bytes: u64,
    pub used_mb: f64,
    /// May be negative once the allowance is exceeded.
    pub remaining_mb: f64,
    /// Clamped to `[0, 100]`.
    pub usage_percent: f64,
    pub is_near_limit: bool,
    pub limit_mb: f64,
}

/// Compute usage for `records` against `limit_mb`.
///
/// Pure: the result depends only on the arguments and is recomputed on every call.
/// `is_near_limit` is judged on the unclamped percentage.
pub fn compute_usage(records: &[UploadRecord], limit_mb: f64) -> UsageStats {
    let total_bytes: u64 = records.iter().map(|r| r.file_size).sum();
    let used_mb = total_bytes as f64 / BYTES_PER_MB;

    let raw_percent = if limit_mb > 0.0 {
        used_mb / limit_mb * 100.0
    } else if used_mb > 0.0 {
        f64::INFINITY
    } else {
        0.0
    };

    UsageStats {
        asset_count: records.len(),
        total_bytes,
        used_mb,
        remaining_mb: limit_mb - used_mb,
        usage_percent: raw_percent.clamp(0.0, 100.0),
        is_near_limit: raw_percent > NEAR_LIMIT_PERCENT,
        limit_mb,
    }
}
