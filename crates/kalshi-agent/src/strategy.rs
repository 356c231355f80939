use std::time::Duration;

use rand::Rng;
use tracing::{info, warn};

const LOW_SUCCESS_RATE: f64 = 0.5;
const HIGH_SUCCESS_RATE: f64 = 0.9;
const BACKOFF_FACTOR: f64 = 2.0;
const SPEEDUP_FACTOR: f64 = 0.8;

/// Jitter range applied to every delay
const JITTER_MIN: f64 = 0.5;
const JITTER_MAX: f64 = 1.5;

/// Request pacing: a base delay scaled by a success-rate driven multiplier
#[derive(Debug, Clone)]
pub struct DelayStrategy {
    base_delay: f64,
    multiplier: f64,
}

impl DelayStrategy {
    pub fn new(base_delay: f64) -> Self {
        Self {
            base_delay,
            multiplier: 1.0,
        }
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Double the multiplier below 50% success, shrink it by 20% above 90%.
    pub fn adjust(&mut self, success_rate: f64) {
        if success_rate < LOW_SUCCESS_RATE {
            self.multiplier *= BACKOFF_FACTOR;
            warn!(
                multiplier = %format!("{:.2}x", self.multiplier),
                success_rate, "Low success rate, increasing delay"
            );
        } else if success_rate > HIGH_SUCCESS_RATE {
            self.multiplier *= SPEEDUP_FACTOR;
            info!(
                multiplier = %format!("{:.2}x", self.multiplier),
                success_rate, "High success rate, decreasing delay"
            );
        }
    }

    /// Delay before the next request, with random jitter.
    pub fn next_delay(&self) -> Duration {
        let jitter = rand::rng().random_range(JITTER_MIN..JITTER_MAX);
        self.delay_with_jitter(jitter)
    }

    fn delay_with_jitter(&self, jitter: f64) -> Duration {
        Duration::try_from_secs_f64(self.base_delay * self.multiplier * jitter)
            .unwrap_or(Duration::ZERO)
    }
}
