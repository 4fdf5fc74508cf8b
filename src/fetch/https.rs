//! HTTPS JSON fetch over reqwest.
//!
//! # Responsibilities
//! - Issue a plain GET (no custom headers)
//! - Read the whole body regardless of status; redirects are not followed
//! - Parse it as JSON, keeping setup, wire, and parse failures distinct

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::config::IndexConfig;
use crate::fetch::error::{FetchError, FetchResult};
use crate::fetch::IndexFetcher;

/// Index fetcher backed by a shared reqwest client.
#[derive(Debug, Clone)]
pub struct HttpsJsonFetcher {
    client: reqwest::Client,
}

impl HttpsJsonFetcher {
    pub fn new(config: &IndexConfig) -> FetchResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| FetchError::RequestSetup(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl IndexFetcher for HttpsJsonFetcher {
    async fn fetch_json(&self, url: &str) -> FetchResult<Value> {
        let url = url::Url::parse(url)
            .map_err(|e| FetchError::RequestSetup(format!("invalid URL '{}': {}", url, e)))?;

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        tracing::debug!(status = %status, bytes = body.len(), "Index response received");

        if body.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&body)?)
    }
}
