//! Fetcher Configuration
//!
//! Fixed at fetcher construction and shared by every iterator it builds:
//! - Page size requested from the remote cluster (default 100)
//! - Per-page request timeout (default 30s)
//! - Client identity sent as version headers

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default number of event batches requested per page
pub const DEFAULT_PAGE_SIZE: i32 = 100;

/// Default lifetime of a single page fetch
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client name sent in version headers
pub const DEFAULT_CLIENT_NAME: &str = "remote-history-fetcher";

/// Server versions this client can talk to
pub const DEFAULT_SUPPORTED_SERVER_VERSIONS: &str = ">=1.0.0 <2.0.0";

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid page size: {0} (must be positive)")]
    InvalidPageSize(i32),

    #[error("Request timeout must be non-zero")]
    ZeroTimeout,

    #[error("Client name must not be empty")]
    EmptyClientName,

    #[error("Malformed configuration: {0}")]
    Malformed(String),
}

/// Remote history fetcher configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetcherConfig {
    /// Maximum event batches per page
    #[serde(default = "default_page_size")]
    pub page_size: i32,

    /// Per-page timeout in milliseconds
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Value of the `client-name` header
    #[serde(default = "default_client_name")]
    pub client_name: String,

    /// Value of the `supported-server-versions` header
    #[serde(default = "default_supported_server_versions")]
    pub supported_server_versions: String,
}

fn default_page_size() -> i32 {
    DEFAULT_PAGE_SIZE
}
fn default_request_timeout_ms() -> u64 {
    DEFAULT_REQUEST_TIMEOUT.as_millis() as u64
}
fn default_client_name() -> String {
    DEFAULT_CLIENT_NAME.to_string()
}
fn default_supported_server_versions() -> String {
    DEFAULT_SUPPORTED_SERVER_VERSIONS.to_string()
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            request_timeout_ms: default_request_timeout_ms(),
            client_name: default_client_name(),
            supported_server_versions: default_supported_server_versions(),
        }
    }
}

impl FetcherConfig {
    /// Parse from JSON; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Malformed(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Per-page timeout as a `Duration`.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size <= 0 {
            return Err(ConfigError::InvalidPageSize(self.page_size));
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.client_name.trim().is_empty() {
            return Err(ConfigError::EmptyClientName);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FetcherConfig::default();
        assert_eq!(config.page_size, 100);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_json_missing_fields_use_defaults() {
        let config = FetcherConfig::from_json_str(r#"{"page_size": 25}"#).unwrap();
        assert_eq!(config.page_size, 25);
        assert_eq!(config.request_timeout_ms, 30_000);
        assert_eq!(config.client_name, DEFAULT_CLIENT_NAME);
    }

    #[test]
    fn test_rejects_non_positive_page_size() {
        let config = FetcherConfig {
            page_size: 0,
            ..FetcherConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidPageSize(0)));
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let result = FetcherConfig::from_json_str(r#"{"request_timeout_ms": 0}"#);
        assert_eq!(result, Err(ConfigError::ZeroTimeout));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let result = FetcherConfig::from_json_str("{not json");
        assert!(matches!(result, Err(ConfigError::Malformed(_))));
    }
}
