use std::path::Path;

use apipoll_common::{PollError, RequestStats};
use chrono::Local;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::client::MarketSource;
use crate::config::AgentConfig;
use crate::quality::{self, Fields, QualityReport, SUCCESS_RATE_TARGET};
use crate::record::MarketRecord;
use crate::report::{
    CollectionMetadata, CollectionSummary, FinalReport, VariableDescriptions, AGENT_VERSION,
    DATA_SOURCE,
};
use crate::strategy::DelayStrategy;

/// Collects validated market records one request at a time
pub struct CollectionAgent<S> {
    source: S,
    config: AgentConfig,
    stats: RequestStats,
    strategy: DelayStrategy,
    records: Vec<MarketRecord>,
}

impl<S: MarketSource> CollectionAgent<S> {
    pub fn new(source: S, config: AgentConfig) -> Self {
        let strategy = DelayStrategy::new(config.base_delay);
        Self {
            source,
            config,
            stats: RequestStats::new(),
            strategy,
            records: Vec::new(),
        }
    }

    pub fn records(&self) -> &[MarketRecord] {
        &self.records
    }

    pub fn stats(&self) -> &RequestStats {
        &self.stats
    }

    pub fn strategy(&self) -> &DelayStrategy {
        &self.strategy
    }

    pub fn success_rate(&self) -> f64 {
        self.stats.success_rate()
    }

    pub fn quality_score(&self) -> f64 {
        quality::quality_score(&self.fields())
    }

    fn fields(&self) -> Vec<Fields> {
        self.records.iter().map(MarketRecord::to_fields).collect()
    }

    pub fn is_complete(&self) -> bool {
        self.records.len() >= self.config.num_markets
    }

    fn request_cap_reached(&self) -> bool {
        self.config
            .max_requests
            .is_some_and(|cap| self.stats.total_requests >= cap)
    }

    /// Collect, then always build and save the final reports.
    pub async fn run(&mut self, output_dir: &Path) -> Result<FinalReport, PollError> {
        info!(
            num_markets = self.config.num_markets,
            status = %self.config.status_filter,
            started_at = %self.stats.started_at,
            "Starting data collection agent"
        );

        self.collect().await;

        info!("Generating final report");
        let report = self.final_report();
        if let Err(e) = report.save(output_dir, &self.records) {
            error!(dir = %output_dir.display(), error = %e, "Failed to save reports");
            return Err(e);
        }
        Ok(report)
    }

    /// Request loop: runs until enough records are stored or the request cap is hit.
    pub async fn collect(&mut self) {
        while !self.is_complete() {
            if self.request_cap_reached() {
                warn!(
                    total_requests = self.stats.total_requests,
                    collected = self.records.len(),
                    "Request cap reached before collection completed"
                );
                break;
            }

            if let Some(market) = self.collect_batch().await {
                self.process_and_store(&market);
            }
            self.assess_performance();
            tokio::time::sleep(self.strategy.next_delay()).await;
        }
    }

    async fn collect_batch(&mut self) -> Option<Value> {
        let success_rate = self.success_rate();
        if success_rate < SUCCESS_RATE_TARGET {
            self.strategy.adjust(success_rate);
        }
        self.make_request().await
    }

    async fn make_request(&mut self) -> Option<Value> {
        match self.source.fetch_market(&self.config.status_filter).await {
            Ok(market) => {
                self.stats.record_success();
                market
            }
            Err(e) => {
                self.stats.record_failure();
                match e.status() {
                    Some(status) => error!(status, "API request failed: {}", status),
                    None => error!(error = %e, "Request error"),
                }
                None
            }
        }
    }

    fn process_and_store(&mut self, market: &Value) {
        let record = MarketRecord::from_market(market, Local::now());
        if !record.is_valid() {
            warn!(ticker = %record.ticker, "Dropping market missing required fields");
            return;
        }
        self.records.push(record);
        info!(
            "Stored data point {}/{}",
            self.records.len(),
            self.config.num_markets
        );
    }

    fn assess_performance(&self) {
        info!(
            "Performance - Quality: {:.2}, Success: {:.2}",
            self.quality_score(),
            self.success_rate()
        );
    }

    pub fn final_report(&self) -> FinalReport {
        let fields = self.fields();
        let success_rate = self.success_rate();
        let quality = QualityReport::assess(&fields, success_rate);

        let summary = CollectionSummary {
            total_records: self.records.len(),
            success_rate,
            quality_score: quality::quality_score(&fields),
            duration_seconds: self.stats.elapsed_secs(),
            total_requests: self.stats.total_requests,
            successful_requests: self.stats.successful_requests,
            failed_requests: self.stats.failed_requests,
        };

        let metadata = CollectionMetadata {
            collection_date: Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
            agent_version: AGENT_VERSION.to_string(),
            data_source: DATA_SOURCE.to_string(),
            total_records: self.records.len(),
            quality_metrics: quality.clone(),
            variables: VariableDescriptions::default(),
        };

        FinalReport {
            summary,
            quality,
            metadata,
        }
    }
}
