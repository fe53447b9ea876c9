//! Pinata endpoints: pin a file, list pins by hash.
//!
//! Request bodies and the response shapes consumed from the API are defined here.

use crate::error::{api_error_message, PinError};
use crate::PinataClient;
use chrono::{DateTime, SecondsFormat, Utc};
use pinvault_core::constants::{PIN_FILE_PATH, PIN_LIST_PATH};
use pinvault_core::{UploadFile, UploadMetadata};
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};

/// Result of a successful pin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinReceipt {
    pub content_hash: String,
    pub pin_size_bytes: u64,
    /// Pin time as reported by the API, verbatim.
    pub server_timestamp: Option<String>,
    pub access_url: String,
}

/// Response of `GET /data/pinList`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PinListing {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub rows: Vec<PinRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PinRow {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub ipfs_pin_hash: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub date_pinned: Option<String>,
    #[serde(default)]
    pub metadata: Option<PinRowMetadata>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PinRowMetadata {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub keyvalues: Option<serde_json::Value>,
}

/// `pinataMetadata` form field.
#[derive(Debug, Serialize)]
pub(crate) struct PinataMetadata<'a> {
    name: &'a str,
    keyvalues: PinKeyValues<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PinKeyValues<'a> {
    description: &'a str,
    story_context: &'a str,
    upload_date: String,
    file_type: &'a str,
    file_size: u64,
}

impl<'a> PinataMetadata<'a> {
    pub(crate) fn new(
        file: &'a UploadFile,
        metadata: &'a UploadMetadata,
        upload_date: DateTime<Utc>,
    ) -> Self {
        Self {
            name: metadata.display_name(&file.file_name),
            keyvalues: PinKeyValues {
                description: &metadata.description,
                story_context: &metadata.story_context,
                upload_date: upload_date.to_rfc3339_opts(SecondsFormat::Millis, true),
                file_type: &file.file_type,
                file_size: file.size(),
            },
        }
    }
}

/// `pinataOptions` form field.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PinataOptions {
    cid_version: u8,
}

#[derive(Debug, Deserialize)]
struct PinFileResponse {
    #[serde(rename = "IpfsHash", default)]
    ipfs_hash: Option<String>,
    #[serde(rename = "PinSize", default)]
    pin_size: Option<u64>,
    #[serde(rename = "Timestamp", default)]
    timestamp: Option<String>,
}

fn build_form(file: &UploadFile, metadata: &UploadMetadata) -> Result<Form, PinError> {
    let pinata_metadata = serde_json::to_string(&PinataMetadata::new(file, metadata, Utc::now()))
        .map_err(|e| PinError::InvalidRequest(e.to_string()))?;
    let pinata_options = serde_json::to_string(&PinataOptions { cid_version: 0 })
        .map_err(|e| PinError::InvalidRequest(e.to_string()))?;

    let mut part = Part::bytes(file.bytes.clone()).file_name(file.file_name.clone());
    if !file.file_type.is_empty() {
        part = part.mime_str(&file.file_type).map_err(|e| {
            PinError::InvalidRequest(format!("invalid MIME type '{}': {}", file.file_type, e))
        })?;
    }

    Ok(Form::new()
        .part("file", part)
        .text("pinataMetadata", pinata_metadata)
        .text("pinataOptions", pinata_options))
}

impl PinataClient {
    /// Pin a file with its metadata envelope.
    pub async fn pin_file(
        &self,
        file: &UploadFile,
        metadata: &UploadMetadata,
    ) -> Result<PinReceipt, PinError> {
        let start = std::time::Instant::now();
        tracing::info!(
            file_name = %file.file_name,
            file_type = %file.file_type,
            size_bytes = file.size(),
            "Pinning file"
        );

        let result = self.send_pin(file, metadata).await;
        let duration_ms = start.elapsed().as_secs_f64() * 1000.0;

        match &result {
            Ok(receipt) => tracing::info!(
                content_hash = %receipt.content_hash,
                pin_size_bytes = receipt.pin_size_bytes,
                duration_ms,
                "File pinned"
            ),
            Err(e) => tracing::warn!(
                file_name = %file.file_name,
                status = ?e.status(),
                error = %e,
                duration_ms,
                "Pin request failed"
            ),
        }

        result
    }

    async fn send_pin(
        &self,
        file: &UploadFile,
        metadata: &UploadMetadata,
    ) -> Result<PinReceipt, PinError> {
        let form = build_form(file, metadata)?;
        let request = self
            .apply_auth(self.client.post(self.build_url(PIN_FILE_PATH)))
            .multipart(form);

        let response = request
            .send()
            .await
            .map_err(|e| PinError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PinError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(PinError::Api {
                status: status.as_u16(),
                message: api_error_message(status.as_u16(), &body),
            });
        }

        let parsed: PinFileResponse = serde_json::from_str(&body)
            .map_err(|e| PinError::MalformedResponse(e.to_string()))?;

        let content_hash = parsed
            .ipfs_hash
            .filter(|hash| !hash.trim().is_empty())
            .ok_or_else(|| PinError::MalformedResponse("response has no IpfsHash".to_string()))?;

        Ok(PinReceipt {
            access_url: self.access_url(&content_hash),
            content_hash,
            pin_size_bytes: parsed.pin_size.unwrap_or(0),
            server_timestamp: parsed.timestamp,
        })
    }

    /// Look up pins whose hash contains `content_hash`.
    ///
    /// Best effort: any failure is logged and reported as `None`.
    pub async fn pin_status(&self, content_hash: &str) -> Option<PinListing> {
        let request = self
            .apply_auth(self.client.get(self.build_url(PIN_LIST_PATH)))
            .query(&[("status", "pinned"), ("hashContains", content_hash)]);

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(content_hash, error = %e, "Pin lookup request failed");
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(
                content_hash,
                status = status.as_u16(),
                "Pin lookup returned a non-success status"
            );
            return None;
        }

        match response.json::<PinListing>().await {
            Ok(listing) => {
                tracing::debug!(content_hash, count = listing.count, "Pin lookup succeeded");
                Some(listing)
            }
            Err(e) => {
                tracing::warn!(content_hash, error = %e, "Pin lookup response was malformed");
                None
            }
        }
    }
}
