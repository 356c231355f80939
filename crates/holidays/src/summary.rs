use std::path::Path;

use apipoll_common::output::write_json_pretty;
use apipoll_common::PollError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{error, info};

/// Holiday count per country, in the order countries were queried.
///
/// Re-inserting a country replaces its count and keeps its first position.
pub type CountryCounts = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryStat {
    pub country: String,
    pub count: usize,
}

/// Empty object when no country was queried
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HolidayStatistics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub most_holidays: Option<CountryStat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub least_holidays: Option<CountryStat>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HolidaySummary {
    pub countries: CountryCounts,
    pub statistics: HolidayStatistics,
}

/// On-disk wrapper around the summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryFile {
    pub holiday_summary: HolidaySummary,
}

impl HolidaySummary {
    /// Build the summary; ties for most/least go to the earliest country.
    pub fn from_counts(countries: CountryCounts) -> Self {
        let mut most: Option<(&str, usize)> = None;
        let mut least: Option<(&str, usize)> = None;

        for (country, count) in countries
            .iter()
            .filter_map(|(c, n)| n.as_u64().map(|n| (c.as_str(), n as usize)))
        {
            if most.map_or(true, |(_, best)| count > best) {
                most = Some((country, count));
            }
            if least.map_or(true, |(_, best)| count < best) {
                least = Some((country, count));
            }
        }

        let stat = |(country, count): (&str, usize)| CountryStat {
            country: country.to_string(),
            count,
        };
        let statistics = HolidayStatistics {
            most_holidays: most.map(stat),
            least_holidays: least.map(stat),
        };

        Self {
            countries,
            statistics,
        }
    }
}

/// Write `{"holiday_summary": ...}` to `path`.
pub fn save_summary(summary: &HolidaySummary, path: &Path) -> Result<(), PollError> {
    let file = SummaryFile {
        holiday_summary: summary.clone(),
    };
    match write_json_pretty(path, &file) {
        Ok(()) => {
            info!("Successfully saved holiday summary to {}", path.display());
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Failed to save holiday summary to JSON file");
            Err(e)
        }
    }
}
