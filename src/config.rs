//! Configuration management for the catalog client.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{ClientError, Result};
use crate::throttle::WindowConfig;

/// Main configuration for the catalog client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API endpoint configuration
    pub api: ApiConfig,

    /// Rate limiting configuration
    #[serde(default)]
    pub rate_limiting: RateLimitingConfig,
}

/// API endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the catalog service
    pub base_url: String,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

fn default_request_timeout_secs() -> u64 {
    30
}

/// Rate limiting configuration.
///
/// Windows combine with logical AND: a call is dispatched only once every
/// window has a free slot. An empty list disables throttling entirely.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RateLimitingConfig {
    /// Rate limit windows applied to every outbound call
    #[serde(default)]
    pub windows: Vec<WindowRule>,
}

/// A single rate limit window rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowRule {
    /// Maximum calls admitted within the period
    pub max_calls: u32,
    /// Period length in milliseconds
    pub period_ms: u64,
}

impl RateLimitingConfig {
    /// Validate the rules and convert them into throttle window configs.
    ///
    /// Fails fast on a zero `max_calls` or `period_ms`; misconfiguration
    /// surfaces here, at construction, never at call time.
    pub fn window_configs(&self) -> Result<Vec<WindowConfig>> {
        self.windows
            .iter()
            .map(|rule| WindowConfig::new(rule.max_calls, Duration::from_millis(rule.period_ms)))
            .collect()
    }
}

impl ClientConfig {
    /// Create a configuration with the given base URL and default settings.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api: ApiConfig {
                base_url: base_url.into(),
                user_agent: default_user_agent(),
                request_timeout_secs: default_request_timeout_secs(),
            },
            rate_limiting: RateLimitingConfig::default(),
        }
    }

    /// Add a rate limit window to the configuration.
    pub fn with_window(mut self, max_calls: u32, period: Duration) -> Self {
        self.rate_limiting.windows.push(WindowRule {
            max_calls,
            period_ms: period.as_millis() as u64,
        });
        self
    }

    /// Load configuration from a YAML file.
    pub fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: ClientConfig = serde_yaml::from_str(&contents)
            .map_err(|e| ClientError::Config(e.to_string()))?;
        Ok(config)
    }
}
