//! HTTP fetcher
//!
//! All remote access goes through [`Fetcher`]. Failures never escape as
//! errors: an unreachable resource is `None` (or `false` for probes) and the
//! caller decides what that means.

use crate::error::InventoryError;
use crate::DEFAULT_USER_AGENT;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;

/// Timeout for content fetches (index files, page HTML)
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout for reachability probes
const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetcher configuration
///
/// Passed in at construction rather than read from process-wide state so
/// tests can inject short timeouts.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User-Agent sent with every request
    pub user_agent: String,
    /// Per-request timeout for content fetches
    pub fetch_timeout: Duration,
    /// Per-request timeout for reachability probes
    pub probe_timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            fetch_timeout: FETCH_TIMEOUT,
            probe_timeout: PROBE_TIMEOUT,
        }
    }
}

/// HTTP client for index fetches and reachability probes
pub struct Fetcher {
    client: reqwest::Client,
    config: FetchConfig,
}

impl Fetcher {
    /// Create a fetcher with default configuration
    pub fn new() -> Result<Self, InventoryError> {
        Self::with_config(FetchConfig::default())
    }

    /// Create a fetcher with custom configuration
    pub fn with_config(config: FetchConfig) -> Result<Self, InventoryError> {
        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .build()
            .map_err(InventoryError::ClientBuild)?;
        Ok(Self { client, config })
    }

    /// Fetch a URL body via GET
    ///
    /// Returns the decoded body on any 2xx response, `None` on network
    /// error, timeout, or non-success status.
    pub async fn fetch_body(&self, url: &str) -> Option<String> {
        let response = match self
            .client
            .get(url)
            .timeout(self.config.fetch_timeout)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                debug!(url, error = %e, "GET failed");
                return None;
            }
        };

        if !response.status().is_success() {
            debug!(url, status = response.status().as_u16(), "GET non-success");
            return None;
        }

        match response.text().await {
            Ok(body) => Some(body),
            Err(e) => {
                debug!(url, error = %e, "Failed to read body");
                None
            }
        }
    }

    /// Check whether a URL is reachable
    ///
    /// Tries HEAD first. If the HEAD fails for any reason (some servers
    /// reject HEAD outright), falls back to GET. Reachable means a 200
    /// status exactly.
    pub async fn check_reachable(&self, url: &str) -> bool {
        match self
            .client
            .head(url)
            .timeout(self.config.probe_timeout)
            .send()
            .await
        {
            Ok(response) if response.status() == StatusCode::OK => return true,
            Ok(response) => {
                debug!(url, status = response.status().as_u16(), "HEAD non-200, retrying as GET");
            }
            Err(e) => {
                debug!(url, error = %e, "HEAD failed, retrying as GET");
            }
        }

        match self
            .client
            .get(url)
            .timeout(self.config.probe_timeout)
            .send()
            .await
        {
            Ok(response) => response.status() == StatusCode::OK,
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = FetchConfig::default();
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(config.fetch_timeout, Duration::from_secs(30));
        assert_eq!(config.probe_timeout, Duration::from_secs(10));
    }

    #[tokio::test]
    async fn test_fetch_body_unreachable_host() {
        let fetcher = Fetcher::with_config(FetchConfig {
            fetch_timeout: Duration::from_millis(500),
            probe_timeout: Duration::from_millis(500),
            ..FetchConfig::default()
        })
        .unwrap();

        // Reserved TEST-NET-1 address, nothing listens there
        let body = fetcher.fetch_body("http://192.0.2.1/searchindex.js").await;
        assert!(body.is_none());
    }

    #[tokio::test]
    async fn test_check_reachable_unreachable_host() {
        let fetcher = Fetcher::with_config(FetchConfig {
            fetch_timeout: Duration::from_millis(500),
            probe_timeout: Duration::from_millis(500),
            ..FetchConfig::default()
        })
        .unwrap();

        assert!(!fetcher.check_reachable("http://192.0.2.1/index.rst").await);
    }
}
