use std::time::Instant;

use chrono::{DateTime, Local};

/// Request counters for one polling run
#[derive(Debug, Clone)]
pub struct RequestStats {
    pub started_at: DateTime<Local>,
    started: Instant,
    pub total_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
}

impl Default for RequestStats {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestStats {
    pub fn new() -> Self {
        Self {
            started_at: Local::now(),
            started: Instant::now(),
            total_requests: 0,
            successful_requests: 0,
            failed_requests: 0,
        }
    }

    pub fn record_success(&mut self) {
        self.total_requests += 1;
        self.successful_requests += 1;
    }

    pub fn record_failure(&mut self) {
        self.total_requests += 1;
        self.failed_requests += 1;
    }

    /// Share of successful requests; 1.0 before any request was made.
    pub fn success_rate(&self) -> f64 {
        if self.total_requests == 0 {
            return 1.0;
        }
        self.successful_requests as f64 / self.total_requests as f64
    }

    /// Seconds since the run started
    pub fn elapsed_secs(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }
}
