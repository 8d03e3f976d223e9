//! Client configuration.
//!
//! Only the API base URL is configurable. The request timeout and cache
//! expiry are fixed.

use std::time::Duration;

use crate::client::ConsumptionClient;
use crate::transport::UreqTransport;

/// Environment variable overriding the API base URL.
pub const API_BASE_URL_ENV: &str = "API_BASE_URL";

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Per-request timeout applied by `UreqTransport`.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: REQUEST_TIMEOUT,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Blank values fall back to the
    /// default base URL.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup(API_BASE_URL_ENV)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self {
            base_url,
            ..Self::default()
        }
    }

    pub fn client(&self) -> ConsumptionClient {
        ConsumptionClient::new(&self.base_url)
    }

    pub fn transport(&self) -> UreqTransport {
        UreqTransport::new(self.timeout)
    }
}
