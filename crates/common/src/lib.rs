//! apipoll-common: helpers shared by the apipoll pollers
//!
//! A thin JSON-over-HTTP client, request counters, atomic JSON file output
//! and tracing setup. Each poller binary is otherwise self-contained.

pub mod error;
pub mod http;
pub mod logging;
pub mod output;
pub mod stats;

pub use error::PollError;
pub use http::JsonClient;
pub use stats::RequestStats;
