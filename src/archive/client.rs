// Archive API client — unauthenticated JSON over HTTP.
//
// The pushshift-style archive endpoints are public and keyless. This is a
// thin reqwest wrapper with a generic GET helper; the submission types and
// pagination live in submissions.rs.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Default archive endpoint (pullpush.io's pushshift mirror).
pub const DEFAULT_ARCHIVE_URL: &str = "https://api.pullpush.io";

/// Per-request timeout. Archive queries over large date ranges can be slow.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Unauthenticated HTTP client for archive API endpoints.
pub struct ArchiveClient {
    client: reqwest::Client,
    base_url: String,
}

impl ArchiveClient {
    /// Create a new client pointing at the given base URL.
    ///
    /// Defaults to `https://api.pullpush.io` — pass a different URL for
    /// testing or alternate mirrors.
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("subpulse/0.1 (community-trend-analysis)")
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Make a GET request to an archive endpoint and deserialize the response.
    ///
    /// `path` is the endpoint path (e.g. "reddit/search/submission").
    /// `params` are query string key-value pairs.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{}/{}", self.base_url, path);

        debug!(path = path, "Archive GET request");

        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .with_context(|| format!("Archive request failed: {path}"))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Archive {path} returned {status}: {body}");
        }

        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to deserialize {path} response"))
    }
}
