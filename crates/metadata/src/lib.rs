//! Client for the external song metadata provider.
//!
//! When a song is added only its group and title are known; release date,
//! lyrics, and link come from the provider's `GET /info` endpoint.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

/// Metadata returned by the provider for a single song.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongMetadata {
    /// Release date, e.g. `16.07.2006`.
    pub release_date: String,
    /// Lyrics, verses separated by a blank line.
    pub text: String,
    pub link: String,
}

/// Errors from the metadata provider.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    /// The HTTP request failed (network, DNS, TLS, timeout) or the body
    /// could not be decoded.
    #[error("Metadata request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("Metadata API error ({status}): {body}")]
    ApiError { status: u16, body: String },
}

/// Source of song metadata. Implemented by [`MetadataClient`] and by test
/// doubles.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    async fn fetch_metadata(&self, group: &str, song: &str)
        -> Result<SongMetadata, MetadataError>;
}

/// HTTP client for the metadata provider.
#[derive(Clone)]
pub struct MetadataClient {
    client: reqwest::Client,
    base_url: String,
}

impl MetadataClient {
    /// Create a client for the provider at `base_url`, e.g.
    /// `http://localhost:8082`, with a per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, MetadataError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Ensure the response has a success status code, returning the
    /// status and body text as an error otherwise.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, MetadataError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(MetadataError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl MetadataProvider for MetadataClient {
    /// Sends `GET /info?group=..&song=..`.
    async fn fetch_metadata(
        &self,
        group: &str,
        song: &str,
    ) -> Result<SongMetadata, MetadataError> {
        tracing::debug!(group, song, "Fetching song metadata");

        let response = self
            .client
            .get(format!("{}/info", self.base_url))
            .query(&[("group", group), ("song", song)])
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        Ok(response.json::<SongMetadata>().await?)
    }
}
