// src/utils/http.rs - HTTP client wrapper with identifying header and timeout
use std::time::Duration;
use anyhow::{Context, Result};
use reqwest::{Client, Response};
use tracing::debug;

/// HTTP client for making requests.
///
/// Every request carries the configured user agent and is bounded by the
/// configured timeout.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    user_agent: String,
}

impl HttpClient {
    /// Create a new HTTP client.
    pub fn new(user_agent: &str, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            user_agent: user_agent.to_string(),
        })
    }

    /// Make a GET request.
    pub async fn get(&self, url: &str) -> Result<Response> {
        debug!("GET {}", url);

        self.client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to GET {}", url))
    }

    /// Get the user agent.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}
