//! Heuristic data-quality scores over flat records
//!
//! Four scores in [0, 1]: completeness (share of filled fields), accuracy
//! (share of records with numeric `last_price` and `volume`), consistency
//! (share of records with the same key set as the first) and timeliness
//! (constant, records are collected live). The quality score is their mean.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::record::MISSING;

pub type Fields = Map<String, Value>;

pub const TIMELINESS: f64 = 1.0;

/// Below this success rate the agent asks for more delay
pub const SUCCESS_RATE_TARGET: f64 = 0.8;
const QUALITY_TARGET: f64 = 0.7;

fn is_filled(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty() && s != MISSING,
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

pub fn completeness(records: &[Fields]) -> f64 {
    let total: usize = records.iter().map(|r| r.len()).sum();
    if total == 0 {
        return 0.0;
    }
    let filled: usize = records
        .iter()
        .map(|r| r.values().filter(|v| is_filled(v)).count())
        .sum();
    filled as f64 / total as f64
}

pub fn accuracy(records: &[Fields]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let accurate = records
        .iter()
        .filter(|r| {
            r.get("last_price").is_some_and(Value::is_number)
                && r.get("volume").is_some_and(Value::is_number)
        })
        .count();
    accurate as f64 / records.len() as f64
}

pub fn consistency(records: &[Fields]) -> f64 {
    if records.len() < 2 {
        return 1.0;
    }
    let first = &records[0];
    let consistent = records
        .iter()
        .filter(|r| r.len() == first.len() && r.keys().all(|k| first.contains_key(k)))
        .count();
    consistent as f64 / records.len() as f64
}

/// Mean of the four scores; 0.0 when nothing was collected.
pub fn quality_score(records: &[Fields]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    (completeness(records) + accuracy(records) + consistency(records) + TIMELINESS) / 4.0
}

pub fn recommendations(success_rate: f64, quality_score: f64) -> Vec<String> {
    let mut recs = Vec::new();
    if success_rate < SUCCESS_RATE_TARGET {
        recs.push("Increase delay between requests".to_string());
    }
    if quality_score < QUALITY_TARGET {
        recs.push("Add validation steps".to_string());
    }
    if recs.is_empty() {
        recs.push("Collection performed well".to_string());
    }
    recs
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    pub completeness: f64,
    pub accuracy: f64,
    pub consistency: f64,
    pub timeliness: f64,
    pub recommendations: Vec<String>,
}

impl QualityReport {
    pub fn assess(records: &[Fields], success_rate: f64) -> Self {
        Self {
            completeness: completeness(records),
            accuracy: accuracy(records),
            consistency: consistency(records),
            timeliness: TIMELINESS,
            recommendations: recommendations(success_rate, quality_score(records)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(v: Value) -> Fields {
        match v {
            Value::Object(m) => m,
            _ => panic!("expected object"),
        }
    }

    fn market(last_price: Value, volume: Value) -> Fields {
        fields(json!({
            "ticker": "T",
            "title": "X",
            "category": "C",
            "status": "open",
            "last_price": last_price,
            "volume": volume,
            "collection_timestamp": "2025-01-01T00:00:00.000000"
        }))
    }

    #[test]
    fn test_empty_scores() {
        assert_eq!(completeness(&[]), 0.0);
        assert_eq!(accuracy(&[]), 0.0);
        assert_eq!(consistency(&[]), 1.0);
        assert_eq!(quality_score(&[]), 0.0);
    }

    #[test]
    fn test_completeness_counts_zero_and_placeholder_as_unfilled() {
        // 7 fields, last_price 0 unfilled
        let a = market(json!(0), json!(10));
        // 7 fields, ticker "N/A" and volume 0 unfilled
        let mut b = market(json!(5), json!(0));
        b.insert("ticker".into(), json!("N/A"));

        let score = completeness(&[a, b]);
        assert!((score - 11.0 / 14.0).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_counts_as_filled() {
        let mut a = market(json!(1), json!(1));
        a.insert("category".into(), json!("Unknown"));
        assert_eq!(completeness(&[a]), 1.0);
    }

    #[test]
    fn test_accuracy_requires_numbers() {
        let records = vec![
            market(json!(42), json!(100)),
            market(json!(0.5), json!(0)),
            market(json!("42"), json!(100)),
            market(Value::Null, json!(100)),
        ];
        assert_eq!(accuracy(&records), 0.5);
    }

    #[test]
    fn test_consistency_compares_key_sets() {
        let a = market(json!(1), json!(1));
        let b = market(json!(2), json!(2));
        let mut c = market(json!(3), json!(3));
        c.remove("status");
        let mut d = market(json!(4), json!(4));
        d.remove("status");
        d.insert("extra".into(), json!(true));

        assert_eq!(consistency(&[a.clone()]), 1.0);
        assert_eq!(consistency(&[a.clone(), b.clone()]), 1.0);
        assert_eq!(consistency(&[a, b, c, d]), 0.5);
    }

    #[test]
    fn test_quality_score_mean() {
        // completeness 6/7, accuracy 1, consistency 1, timeliness 1
        let records = vec![market(json!(0), json!(3))];
        let expected = (6.0 / 7.0 + 1.0 + 1.0 + 1.0) / 4.0;
        assert!((quality_score(&records) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_recommendations() {
        assert_eq!(
            recommendations(0.95, 0.9),
            vec!["Collection performed well".to_string()]
        );
        assert_eq!(
            recommendations(0.5, 0.9),
            vec!["Increase delay between requests".to_string()]
        );
        assert_eq!(
            recommendations(0.5, 0.0),
            vec![
                "Increase delay between requests".to_string(),
                "Add validation steps".to_string()
            ]
        );
        assert_eq!(
            recommendations(0.8, 0.7),
            vec!["Collection performed well".to_string()]
        );
    }

    #[test]
    fn test_assess_with_no_records() {
        let report = QualityReport::assess(&[], 1.0);
        assert_eq!(report.completeness, 0.0);
        assert_eq!(report.accuracy, 0.0);
        assert_eq!(report.consistency, 1.0);
        assert_eq!(report.timeliness, 1.0);
        assert_eq!(report.recommendations, vec!["Add validation steps".to_string()]);
    }
}
