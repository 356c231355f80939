use std::time::Duration;

use apipoll_common::{JsonClient, PollError};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// Source of raw market objects, one per call
#[async_trait]
pub trait MarketSource: Send + Sync {
    /// Fetch a single market with the given status.
    ///
    /// `Ok(None)` means the request succeeded but returned no market.
    async fn fetch_market(&self, status_filter: &str) -> Result<Option<Value>, PollError>;
}

/// Response from GET /markets
#[derive(Debug, Deserialize)]
struct MarketsResponse {
    #[serde(default)]
    markets: Option<Vec<Value>>,
}

/// Unauthenticated client for the Kalshi public markets endpoint
pub struct KalshiMarketsClient {
    client: JsonClient,
}

impl KalshiMarketsClient {
    /// `base_url` includes the API prefix, e.g. `https://demo-api.kalshi.co/trade-api/v2`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, PollError> {
        Ok(Self {
            client: JsonClient::with_timeout(base_url, timeout)?,
        })
    }
}

#[async_trait]
impl MarketSource for KalshiMarketsClient {
    async fn fetch_market(&self, status_filter: &str) -> Result<Option<Value>, PollError> {
        let resp: MarketsResponse = self
            .client
            .get_json("/markets", &[("limit", "1"), ("status", status_filter)])
            .await?;
        Ok(resp.markets.and_then(|m| m.into_iter().next()))
    }
}
