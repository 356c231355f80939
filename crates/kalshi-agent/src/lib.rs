//! apipoll-kalshi: Kalshi market collection agent
//!
//! Polls the Kalshi markets endpoint one market at a time, validates and
//! stores the flattened records, paces itself with a delay multiplier driven
//! by the running success rate, and writes data, summary, quality and
//! metadata reports as JSON.

pub mod agent;
pub mod client;
pub mod config;
pub mod quality;
pub mod record;
pub mod report;
pub mod strategy;

pub use agent::CollectionAgent;
pub use client::{KalshiMarketsClient, MarketSource};
pub use config::AgentConfig;
pub use record::MarketRecord;
pub use report::FinalReport;
