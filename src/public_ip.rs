//! Public IP lookup over HTTPS.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::error::{Error, Result};
use crate::traits::PublicIpSource;

const DEFAULT_ENDPOINT: &str = "https://api.ipify.org";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches the public IP from a plain-text HTTP endpoint.
pub struct HttpPublicIpSource {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpPublicIpSource {
    pub fn new() -> Result<Self> {
        Self::with_endpoint(DEFAULT_ENDPOINT)
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, endpoint: endpoint.into() })
    }
}

#[async_trait]
impl PublicIpSource for HttpPublicIpSource {
    async fn fetch_public_ip(&self) -> Result<String> {
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| Error::network(format!("public IP request failed: {e}")))?
            .error_for_status()
            .map_err(|e| Error::network(format!("public IP request failed: {e}")))?;

        let body = response
            .text()
            .await
            .map_err(|e| Error::network(format!("public IP response unreadable: {e}")))?;

        let ip = body.trim().to_string();
        debug!(ip = %ip, "public IP resolved");
        Ok(ip)
    }
}
