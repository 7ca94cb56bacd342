//! HTTP-fetch port and its reqwest implementation.
//!
//! Adapters only ever see this trait, so tests can feed them canned
//! payloads without a network.

use async_trait::async_trait;
use serde_json::Value;

/// Minimal "fetch a document from a URL" contract.
#[async_trait]
pub trait HttpFetch: Send + Sync {
    async fn get_json(&self, url: &str) -> anyhow::Result<Value>;
    async fn get_text(&self, url: &str) -> anyhow::Result<String>;
}

/// Production fetcher. Non-2xx statuses become errors.
pub struct ReqwestFetch {
    client: reqwest::Client,
}

impl ReqwestFetch {
    pub fn new() -> Self {
        Self { client: reqwest::Client::new() }
    }
}

impl Default for ReqwestFetch {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpFetch for ReqwestFetch {
    async fn get_json(&self, url: &str) -> anyhow::Result<Value> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.json().await?)
    }

    async fn get_text(&self, url: &str) -> anyhow::Result<String> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}
