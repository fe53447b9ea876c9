//! Rendering of command results as tables or JSON.

use anyhow::Context;
use clap::ValueEnum;
use pinvault_core::{format_file_size, MediaCategory, UploadRecord, UsageStats};
use serde::Serialize;

use crate::truncate_string;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

pub fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize output")?;
    println!("{}", out);
    Ok(())
}

/// One gallery entry as shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GalleryItem {
    pub title: String,
    pub category: MediaCategory,
    pub size: String,
    pub content_hash: String,
    pub uploaded: String,
    pub access_url: String,
}

impl From<&UploadRecord> for GalleryItem {
    fn from(record: &UploadRecord) -> Self {
        Self {
            title: record.display_title().to_string(),
            category: record.category(),
            size: format_file_size(record.file_size),
            content_hash: record.content_hash.clone(),
            uploaded: record.upload_timestamp.format("%Y-%m-%d %H:%M").to_string(),
            access_url: record.access_url.clone(),
        }
    }
}

/// Gallery entries in catalog order.
pub fn gallery(records: &[UploadRecord]) -> Vec<GalleryItem> {
    records.iter().map(GalleryItem::from).collect()
}

pub fn print_gallery_table(items: &[GalleryItem]) {
    if items.is_empty() {
        println!("No uploads yet.");
        return;
    }

    println!(
        "{:<30} {:<9} {:>10} {:<48} {:<16}",
        "TITLE", "TYPE", "SIZE", "HASH", "UPLOADED"
    );
    for item in items {
        println!(
            "{:<30} {:<9} {:>10} {:<48} {:<16}",
            truncate_string(&item.title, 30),
            item.category.to_string(),
            item.size,
            item.content_hash,
            item.uploaded
        );
        println!("  {}", item.access_url);
    }
    println!("\n{} asset(s)", items.len());
}

pub fn print_usage_table(usage: &UsageStats) {
    println!("\n=== Storage Usage ===\n");
    println!("Assets:    {}", usage.asset_count);
    println!(
        "Used:      {:.2} MB ({})",
        usage.used_mb,
        format_file_size(usage.total_bytes)
    );
    println!("Remaining: {:.2} MB of {:.0} MB", usage.remaining_mb, usage.limit_mb);
    println!("Usage:     {:.1}%", usage.usage_percent);
    if usage.is_near_limit {
        println!("\nWarning: storage is nearly full.");
    }
}

pub fn print_record_table(record: &UploadRecord) {
    println!("Uploaded {}", record.display_title());
    println!("  Hash: {}", record.content_hash);
    println!("  Size: {}", format_file_size(record.file_size));
    println!("  URL:  {}", record.access_url);
}
