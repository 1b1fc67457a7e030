//! Client configuration

use std::time::Duration;

/// Client configuration for connecting to the ABSENTA backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:8087")
    pub base_url: String,

    /// Bearer token for authentication
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Fixed delay between a confirmed write and the follow-up schedule
    /// reload, in milliseconds. The backend gives no read-after-write
    /// guarantee; tests set this to zero.
    pub refresh_delay_ms: u64,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: 30,
            refresh_delay_ms: 600,
        }
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the post-success refresh delay
    pub fn with_refresh_delay(mut self, millis: u64) -> Self {
        self.refresh_delay_ms = millis;
        self
    }

    /// The refresh delay as a [`Duration`]
    pub fn refresh_delay(&self) -> Duration {
        Duration::from_millis(self.refresh_delay_ms)
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> super::HttpClient {
        super::HttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8087")
    }
}
