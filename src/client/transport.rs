//! HTTP transport abstraction and the reqwest-backed implementation.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::config::ApiConfig;
use crate::error::Result;

/// A raw HTTP response: status code and body bytes.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Raw response body
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Whether the status code is in the success range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for HTTP transport implementations.
///
/// This trait abstracts the network layer so the client can be exercised
/// in tests with a scripted transport instead of a live service.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Perform a GET request against the given URL.
    async fn get(&self, url: &str) -> Result<HttpResponse>;
}

/// Production transport backed by `reqwest`.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport from the API configuration.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse> {
        debug!(url = %url, "Dispatching GET request");

        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_creation() {
        let config = ApiConfig {
            base_url: "https://api.example.com".to_string(),
            user_agent: "test-agent/0.1".to_string(),
            request_timeout_secs: 5,
        };
        assert!(ReqwestTransport::new(&config).is_ok());
    }

    #[test]
    fn test_success_status_range() {
        let ok = HttpResponse { status: 200, body: Vec::new() };
        let not_found = HttpResponse { status: 404, body: Vec::new() };
        assert!(ok.is_success());
        assert!(!not_found.is_success());
    }
}
