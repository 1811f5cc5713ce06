//! Plain HTTP media fetcher.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};

use crate::api::source::{FetchResponse, MediaFetcher};
use crate::error::{Error, Result};

/// Fetches media bytes with a shared `reqwest` client.
pub struct HttpFetcher {
    client: Client,
    user_agent: String,
}

impl HttpFetcher {
    pub fn new(user_agent: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Api(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, user_agent })
    }
}

#[async_trait]
impl MediaFetcher for HttpFetcher {
    async fn get(&self, url: &str) -> Result<FetchResponse> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header(header::USER_AGENT, &self.user_agent)
            .send()
            .await
            .map_err(|e| Error::TransientFetch(format!("{}: {}", url, e)))?;

        let status = response.status().as_u16();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::TransientFetch(format!("{}: {}", url, e)))?;

        tracing::debug!("Response status: {} ({} bytes)", status, bytes.len());

        Ok(FetchResponse {
            status,
            bytes: bytes.to_vec(),
        })
    }
}
