//! Minimal JSON-over-HTTP GET client
//!
//! Wraps a `reqwest::Client` with a fixed per-call timeout and maps transport
//! failures, non-success statuses and undecodable bodies onto [`PollError`].

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::PollError;

/// Per-call timeout used when none is given
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Body excerpt length kept in decode errors
const BODY_EXCERPT_CHARS: usize = 200;

/// HTTP client bound to one API base URL
#[derive(Debug, Clone)]
pub struct JsonClient {
    http: Client,
    base_url: String,
    timeout: Duration,
}

impl JsonClient {
    /// Create a client with the default 10s timeout
    pub fn new(base_url: impl Into<String>) -> Result<Self, PollError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a client with an explicit per-call timeout
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, PollError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| PollError::Request(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `base_url + path` with query pairs and decode the body as `T`.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, PollError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, query = ?query, "GET request");

        let resp = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(PollError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.text().await.map_err(|e| self.transport_error(e))?;
        serde_json::from_str(&body).map_err(|e| {
            let excerpt: String = body.chars().take(BODY_EXCERPT_CHARS).collect();
            PollError::Decode(format!("{}: {}", e, excerpt))
        })
    }

    fn transport_error(&self, e: reqwest::Error) -> PollError {
        if e.is_timeout() {
            PollError::Timeout {
                timeout_ms: self.timeout.as_millis() as u64,
            }
        } else if e.is_connect() {
            PollError::Connection(e.to_string())
        } else {
            PollError::Request(e.to_string())
        }
    }
}
