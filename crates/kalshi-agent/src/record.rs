use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Placeholder for a missing identifier field
pub const MISSING: &str = "N/A";
/// Placeholder for a missing descriptive field
pub const UNKNOWN: &str = "Unknown";

/// One flattened Kalshi market, as stored and written to disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketRecord {
    pub ticker: String,
    pub title: String,
    pub category: String,
    pub status: String,
    /// Kept exactly as the API sent it; 0 when absent
    pub last_price: Value,
    /// Kept exactly as the API sent it; 0 when absent
    pub volume: Value,
    pub collection_timestamp: String,
}

impl MarketRecord {
    /// Extract the stored fields from a raw market object.
    pub fn from_market(raw: &Value, now: DateTime<Local>) -> Self {
        Self {
            ticker: string_field(raw, "ticker", MISSING),
            title: string_field(raw, "title", MISSING),
            category: string_field(raw, "category", UNKNOWN),
            status: string_field(raw, "status", UNKNOWN),
            last_price: raw.get("last_price").cloned().unwrap_or_else(|| Value::from(0)),
            volume: raw.get("volume").cloned().unwrap_or_else(|| Value::from(0)),
            collection_timestamp: now.format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
        }
    }

    /// A record is kept only when ticker, title and category are all present.
    pub fn is_valid(&self) -> bool {
        [&self.ticker, &self.title, &self.category]
            .iter()
            .all(|v| !v.is_empty() && v.as_str() != MISSING)
    }

    /// The record as a flat JSON object, in field order.
    pub fn to_fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("ticker".into(), Value::from(self.ticker.as_str()));
        fields.insert("title".into(), Value::from(self.title.as_str()));
        fields.insert("category".into(), Value::from(self.category.as_str()));
        fields.insert("status".into(), Value::from(self.status.as_str()));
        fields.insert("last_price".into(), self.last_price.clone());
        fields.insert("volume".into(), self.volume.clone());
        fields.insert(
            "collection_timestamp".into(),
            Value::from(self.collection_timestamp.as_str()),
        );
        fields
    }
}

fn string_field(raw: &Value, key: &str, default: &str) -> String {
    raw.get(key)
        .and_then(Value::as_str)
        .unwrap_or(default)
        .to_string()
}
