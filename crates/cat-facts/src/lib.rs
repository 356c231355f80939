//! apipoll-catfacts: fetch random cat facts from catfact.ninja
//!
//! Each fact is one `GET /fact` call. Non-success statuses and empty facts
//! are skipped; a transport failure ends the run early but keeps what was
//! already fetched.

use std::path::Path;
use std::time::Duration;

use apipoll_common::output::write_json_pretty;
use apipoll_common::{JsonClient, PollError};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

pub const CAT_FACTS_URL: &str = "https://catfact.ninja";
pub const DEFAULT_FACT_COUNT: usize = 5;
pub const DEFAULT_OUTPUT: &str = "cat_facts.json";

/// Response from GET /fact
#[derive(Debug, Deserialize)]
struct FactResponse {
    #[serde(default)]
    fact: Option<String>,
}

/// On-disk layout of the saved facts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactsFile {
    pub facts: Vec<String>,
}

pub struct CatFactsClient {
    client: JsonClient,
}

impl CatFactsClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, PollError> {
        Ok(Self {
            client: JsonClient::with_timeout(base_url, timeout)?,
        })
    }

    /// Fetch up to `count` facts, one request each.
    pub async fn fetch_facts(&self, count: usize) -> Vec<String> {
        let mut facts = Vec::with_capacity(count);
        info!("Starting to fetch {} cat facts", count);

        for i in 1..=count {
            match self.client.get_json::<FactResponse>("/fact", &[]).await {
                Ok(FactResponse { fact: Some(fact) }) if !fact.is_empty() => {
                    facts.push(fact);
                    info!("Successfully retrieved fact {}", i);
                }
                Ok(_) => warn!("No fact found in response for request {}", i),
                Err(PollError::Status { status, .. }) => {
                    error!("API request {} failed with status code: {}", i, status);
                }
                Err(PollError::Timeout { timeout_ms }) => {
                    error!(timeout_ms, "Request timed out");
                    break;
                }
                Err(PollError::Connection(e)) => {
                    error!(error = %e, "Connection error occurred");
                    break;
                }
                Err(e) => {
                    error!(error = %e, "Request error occurred");
                    break;
                }
            }
        }

        info!(
            "Successfully retrieved {} out of {} requested facts",
            facts.len(),
            count
        );
        facts
    }
}

/// Fetch `count` facts and save them to `path` when at least one came back.
pub async fn collect_and_save(
    client: &CatFactsClient,
    count: usize,
    path: &Path,
) -> Result<Vec<String>, PollError> {
    let facts = client.fetch_facts(count).await;
    if !facts.is_empty() {
        save_facts(&facts, path)?;
    }
    Ok(facts)
}

/// Write `{"facts": [...]}` to `path`.
pub fn save_facts(facts: &[String], path: &Path) -> Result<(), PollError> {
    let file = FactsFile {
        facts: facts.to_vec(),
    };
    match write_json_pretty(path, &file) {
        Ok(()) => {
            info!("Successfully saved {} facts to {}", facts.len(), path.display());
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Failed to save facts to JSON file");
            Err(e)
        }
    }
}
