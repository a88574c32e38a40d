//! Upstream PDF fetching
//!
//! The proxy re-serves a single fixed document. Each call to [`PdfSource::fetch`]
//! makes exactly one attempt; there is no retry.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use crate::config::UpstreamConfig;

/// Outcome of a completed upstream exchange
#[derive(Debug, Clone)]
pub enum UpstreamResponse {
    /// 2xx with the full payload
    Success {
        /// Value of the upstream `Content-Length` header, if it sent one
        content_length: Option<u64>,
        bytes: Bytes,
    },
    /// Any non-success HTTP status
    Failed { status: u16 },
}

/// Upstream errors that never produced a usable HTTP response
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("Upstream transport failure: {0}")]
    Transport(String),
}

/// Source of the proxied PDF bytes
#[async_trait]
pub trait PdfSource: Send + Sync {
    /// Location being proxied, for logging
    fn url(&self) -> &str;

    /// Fetch the document once
    async fn fetch(&self) -> Result<UpstreamResponse, UpstreamError>;
}

/// HTTP-backed source using reqwest
pub struct HttpPdfSource {
    client: reqwest::Client,
    url: String,
}

impl HttpPdfSource {
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| UpstreamError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: config.pdf_url.clone(),
        })
    }
}

#[async_trait]
impl PdfSource for HttpPdfSource {
    fn url(&self) -> &str {
        &self.url
    }

    async fn fetch(&self) -> Result<UpstreamResponse, UpstreamError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| UpstreamError::Transport(format!("Failed to fetch {}: {}", self.url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Ok(UpstreamResponse::Failed {
                status: status.as_u16(),
            });
        }

        let content_length = response.content_length();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| UpstreamError::Transport(format!("Failed to read body: {}", e)))?;

        tracing::debug!(
            "Fetched {} bytes from {} (declared length {:?})",
            bytes.len(),
            self.url,
            content_length
        );

        Ok(UpstreamResponse::Success {
            content_length,
            bytes,
        })
    }
}
