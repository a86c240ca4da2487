//! Client configuration

use menu_engine::Config;

/// Connection settings for the menu backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL (e.g., "http://localhost:54321")
    pub base_url: String,

    /// Public API key, sent as `apikey` and as the bearer token
    pub api_key: String,

    /// Request timeout in milliseconds
    pub timeout_ms: u64,

    /// Menu change polling interval in milliseconds
    pub poll_interval_ms: u64,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout_ms: 30_000,
            poll_interval_ms: 5_000,
        }
    }

    /// Take backend settings from the engine configuration
    pub fn from_engine(config: &Config) -> Self {
        Self {
            base_url: config.backend_url.clone(),
            api_key: config.backend_api_key.clone(),
            timeout_ms: config.request_timeout_ms,
            poll_interval_ms: config.feed_poll_interval_ms,
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_poll_interval_ms(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:54321", "")
    }
}
