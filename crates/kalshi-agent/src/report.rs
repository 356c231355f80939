//! Final collection reports
//!
//! Four JSON files are written per run: the collected records, a run summary,
//! the quality report, and descriptive metadata that embeds the quality
//! report and documents each record field.

use std::path::Path;

use apipoll_common::output::write_json_pretty;
use apipoll_common::PollError;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::quality::QualityReport;
use crate::record::MarketRecord;

pub const DATA_FILE: &str = "kalshi_collected_data.json";
pub const SUMMARY_FILE: &str = "kalshi_collection_summary.json";
pub const QUALITY_FILE: &str = "kalshi_quality_report.json";
pub const METADATA_FILE: &str = "kalshi_metadata.json";

pub const AGENT_VERSION: &str = "1.0";
pub const DATA_SOURCE: &str = "Kalshi Markets API";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionSummary {
    pub total_records: usize,
    pub success_rate: f64,
    pub quality_score: f64,
    pub duration_seconds: f64,
    pub total_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
}

/// Human-readable description of each record field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDescriptions {
    pub ticker: String,
    pub title: String,
    pub category: String,
    pub status: String,
    pub last_price: String,
    pub volume: String,
    pub collection_timestamp: String,
}

impl Default for VariableDescriptions {
    fn default() -> Self {
        Self {
            ticker: "Market identifier".to_string(),
            title: "Market description".to_string(),
            category: "Market category".to_string(),
            status: "Market status".to_string(),
            last_price: "Last traded price".to_string(),
            volume: "Trading volume".to_string(),
            collection_timestamp: "Collection time".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionMetadata {
    pub collection_date: String,
    pub agent_version: String,
    pub data_source: String,
    pub total_records: usize,
    pub quality_metrics: QualityReport,
    pub variables: VariableDescriptions,
}

/// Everything written at the end of a run, apart from the records themselves
#[derive(Debug, Clone, PartialEq)]
pub struct FinalReport {
    pub summary: CollectionSummary,
    pub quality: QualityReport,
    pub metadata: CollectionMetadata,
}

impl FinalReport {
    /// Write records and reports under `output_dir`.
    pub fn save(&self, output_dir: &Path, records: &[MarketRecord]) -> Result<(), PollError> {
        std::fs::create_dir_all(output_dir)?;

        let data_path = output_dir.join(DATA_FILE);
        let summary_path = output_dir.join(SUMMARY_FILE);
        let quality_path = output_dir.join(QUALITY_FILE);
        let metadata_path = output_dir.join(METADATA_FILE);

        write_json_pretty(&data_path, records)?;
        write_json_pretty(&summary_path, &self.summary)?;
        write_json_pretty(&quality_path, &self.quality)?;
        write_json_pretty(&metadata_path, &self.metadata)?;

        info!(dir = %output_dir.display(), "All reports saved successfully");
        Ok(())
    }
}
