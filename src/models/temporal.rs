//! Door-hold (dwell) time model.
//!
//! Dwell time grows linearly with the total weight transferring through
//! the doors, at a normal per-kg rate up to a congestion threshold and a
//! steeper rate beyond it. The two pieces meet at the threshold, so the
//! function is continuous and strictly increasing.

use crate::config::Config;

/// Dwell-time model for a single stop.
#[derive(Debug, Clone)]
pub struct Temporal {
    base_time: f64,
    rate_normal: f64,
    rate_congested: f64,
    congestion_threshold: f64,
}

impl Temporal {
    /// Creates a dwell model from the run configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            base_time: config.hold_base_time,
            rate_normal: config.hold_rate_normal,
            rate_congested: config.hold_rate_congested,
            congestion_threshold: config.hold_congestion_threshold.max(0.0),
        }
    }

    /// Door-open duration for a stop (s).
    ///
    /// Boarding and alighting weights add; the sum determines which side
    /// of the congestion knee applies.
    pub fn hold_time(&self, boarding_kg: f64, alighting_kg: f64) -> f64 {
        let total = boarding_kg + alighting_kg;
        if total <= self.congestion_threshold {
            self.base_time + self.rate_normal * total
        } else {
            let normal_part = self.rate_normal * self.congestion_threshold;
            let congested_part = self.rate_congested * (total - self.congestion_threshold);
            self.base_time + normal_part + congested_part
        }
    }
}
