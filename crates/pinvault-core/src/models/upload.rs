use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

use super::metadata::UploadMetadata;

/// Display category of an uploaded file, derived from its MIME type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaCategory {
    Image,
    Video,
    Audio,
    Document,
}

impl MediaCategory {
    pub fn from_mime(file_type: &str) -> Self {
        let normalized = file_type.to_lowercase();
        if normalized.starts_with("image/") {
            MediaCategory::Image
        } else if normalized.starts_with("video/") {
            MediaCategory::Video
        } else if normalized.starts_with("audio/") {
            MediaCategory::Audio
        } else {
            MediaCategory::Document
        }
    }
}

impl Display for MediaCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            MediaCategory::Image => write!(f, "image"),
            MediaCategory::Video => write!(f, "video"),
            MediaCategory::Audio => write!(f, "audio"),
            MediaCategory::Document => write!(f, "document"),
        }
    }
}

/// A file selected for upload, fully read into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    /// MIME type, e.g. `image/png`.
    pub file_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, file_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            file_type: file_type.into(),
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// One pinned artifact in the catalog.
///
/// `content_hash` and `access_url` come from the same successful pin; a record
/// never exists for a failed attempt. Legacy browser exports used `ipfsHash`,
/// `ipfsUrl` and `uploadDate`, which are accepted on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRecord {
    pub file_name: String,
    pub file_size: u64,
    pub file_type: String,
    #[serde(alias = "ipfsHash")]
    pub content_hash: String,
    #[serde(alias = "ipfsUrl")]
    pub access_url: String,
    #[serde(alias = "uploadDate")]
    pub upload_timestamp: DateTime<Utc>,
    #[serde(default)]
    pub metadata: UploadMetadata,
}

impl UploadRecord {
    pub fn category(&self) -> MediaCategory {
        MediaCategory::from_mime(&self.file_type)
    }

    /// Title shown in the gallery: the metadata title, else the file name.
    pub fn display_title(&self) -> &str {
        self.metadata.display_name(&self.file_name)
    }
}
