//! HTTP client for the Pinata pinning API.
//!
//! Provides [`PinataClient`], which pins a single file with its metadata and
//! looks up pin status, and the [`Pinner`] trait through which the upload
//! workflow drives it. All pin failures are returned as [`PinError`] values.

pub mod api;
pub mod error;

use anyhow::{Context, Result};
use async_trait::async_trait;
use pinvault_core::{PinataCredentials, PinataSettings, UploadFile, UploadMetadata};
use reqwest::Client;

pub use api::{PinListing, PinReceipt, PinRow, PinRowMetadata};
pub use error::PinError;

/// Something that can pin a file and report pin status.
#[async_trait]
pub trait Pinner: Send + Sync {
    /// Pin `file` with `metadata`. Every failure is reported through the error value.
    async fn pin(&self, file: &UploadFile, metadata: &UploadMetadata)
        -> Result<PinReceipt, PinError>;

    /// Best-effort pin status lookup. Any failure yields `None`.
    async fn lookup(&self, content_hash: &str) -> Option<PinListing>;
}

/// HTTP client for the Pinata API authenticated with an API key pair.
#[derive(Clone, Debug)]
pub struct PinataClient {
    client: Client,
    api_url: String,
    gateway_url: String,
    credentials: PinataCredentials,
}

impl PinataClient {
    /// Create a client. Requests use the transport's default timeouts.
    pub fn new(settings: &PinataSettings) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("pinvault/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_url: settings.api_url.trim_end_matches('/').to_string(),
            gateway_url: settings.gateway_url.trim_end_matches('/').to_string(),
            credentials: settings.credentials.clone(),
        })
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    /// Gateway URL at which `content_hash` is served.
    pub fn access_url(&self, content_hash: &str) -> String {
        format!("{}/ipfs/{}", self.gateway_url, content_hash)
    }

    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("pinata_api_key", self.credentials.api_key())
            .header("pinata_secret_api_key", self.credentials.secret_api_key())
    }
}

#[async_trait]
impl Pinner for PinataClient {
    async fn pin(
        &self,
        file: &UploadFile,
        metadata: &UploadMetadata,
    ) -> Result<PinReceipt, PinError> {
        self.pin_file(file, metadata).await
    }

    async fn lookup(&self, content_hash: &str) -> Option<PinListing> {
        self.pin_status(content_hash).await
    }
}
