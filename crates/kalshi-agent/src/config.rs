//! Agent configuration
//!
//! Loaded from an optional JSON (or YAML, by extension) file. Every field has
//! its own default, so a partial file only overrides what it names. A file
//! that cannot be read or parsed falls back to the defaults entirely.

use std::path::Path;
use std::time::Duration;

use apipoll_common::PollError;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Kalshi demo trading API
pub const DEFAULT_BASE_URL: &str = "https://demo-api.kalshi.co/trade-api/v2";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Base pause between requests, in seconds
    pub base_delay: f64,
    /// Number of valid records to collect before stopping
    pub num_markets: usize,
    /// Market status passed as the `status` query parameter
    pub status_filter: String,
    pub base_url: String,
    /// Per-request HTTP timeout, in seconds
    pub timeout_secs: u64,
    /// Stop after this many requests even if `num_markets` was not reached
    pub max_requests: Option<u64>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            base_delay: 1.0,
            num_markets: 5,
            status_filter: "open".to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
            max_requests: None,
        }
    }
}

impl AgentConfig {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, PollError> {
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => {
                serde_yaml::from_str(&content).map_err(|e| PollError::Config(e.to_string()))
            }
            _ => Ok(serde_json::from_str(&content)?),
        }
    }

    /// Load configuration from a file, falling back to defaults on any error.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => {
                info!(path = %path.display(), "loaded agent config");
                config
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load config, using defaults");
                Self::default()
            }
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    #[test]
    fn test_defaults() {
        let config = AgentConfig::default();
        assert_eq!(config.base_delay, 1.0);
        assert_eq!(config.num_markets, 5);
        assert_eq!(config.status_filter, "open");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert!(config.max_requests.is_none());
    }

    #[test]
    fn test_load_partial_json_keeps_other_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"num_markets": 12, "status_filter": "closed"}"#)
            .unwrap();

        let config = AgentConfig::load(file.path()).unwrap();
        assert_eq!(config.num_markets, 12);
        assert_eq!(config.status_filter, "closed");
        assert_eq!(config.base_delay, 1.0);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_load_yaml_by_extension() {
        let mut file = Builder::new().suffix(".yaml").tempfile().unwrap();
        let yaml = r#"
base_delay: 0.25
num_markets: 3
max_requests: 40
"#;
        file.write_all(yaml.as_bytes()).unwrap();

        let config = AgentConfig::load(file.path()).unwrap();
        assert_eq!(config.base_delay, 0.25);
        assert_eq!(config.num_markets, 3);
        assert_eq!(config.max_requests, Some(40));
        assert_eq!(config.status_filter, "open");
    }

    #[test]
    fn test_load_invalid_json_is_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();
        assert!(AgentConfig::load(file.path()).is_err());
    }

    #[test]
    fn test_load_or_default_falls_back() {
        let missing = Path::new("/nonexistent/agent-config.json");
        assert_eq!(AgentConfig::load_or_default(missing), AgentConfig::default());

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[1, 2, 3]").unwrap();
        assert_eq!(AgentConfig::load_or_default(file.path()), AgentConfig::default());
    }
}
