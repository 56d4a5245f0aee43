//! HTTP client for fetching release packages.

use anyhow::{Context, Result};
use log::debug;
use reqwest::Client;
use reqwest::header::RANGE;

/// Asks for the first byte only; servers that ignore ranges send a body that is dropped unread.
const FIRST_BYTE_RANGE: &str = "bytes=0-0";

/// Thin wrapper over a reqwest Client configured at startup.
///
/// Timeouts come from the wrapped client; no request is retried.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a new HTTP client wrapping the given reqwest Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Follows any redirects from `url` and returns the URL that finally answered.
    ///
    /// Presigned CDN URLs only accept the method they were signed for, so this
    /// is a ranged GET rather than a HEAD.
    #[tracing::instrument(skip(self))]
    pub async fn resolve_final_url(&self, url: &str) -> Result<String> {
        debug!("Resolving final URL for {}...", url);

        let response = self
            .client
            .get(url)
            .header(RANGE, FIRST_BYTE_RANGE)
            .send()
            .await
            .context("Failed to send request")?
            .error_for_status()
            .context("Server returned an error status")?;

        let final_url = response.url().to_string();
        if final_url != url {
            debug!("{} redirected to {}", url, final_url);
        }

        Ok(final_url)
    }

    /// Downloads the body at `url` fully into memory.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        debug!("Downloading {}...", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to start download request")?
            .error_for_status()
            .context("Server returned an error status")?;

        let bytes = response
            .bytes()
            .await
            .context("Failed to read download body")?;

        debug!(
            "Downloaded {:.2} MB",
            bytes.len() as f64 / (1024.0 * 1024.0)
        );

        Ok(bytes.to_vec())
    }
}
