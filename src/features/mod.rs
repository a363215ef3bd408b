//! Per-frame signal processing: rolling windows, temporal smoothing, behavior metrics.

mod window;
mod smoother;
mod behavioral;

pub use window::{weighted_mean, RollingWindow};
pub use smoother::TemporalSmoother;
pub use behavioral::{
    raw_metrics, AffectProbabilities, BehaviorMetrics, FacePosition, Metric, MetricCalculator,
    NEUTRAL_EYE_CONTACT,
};

use crate::category::InterviewCategory;
use serde::{Deserialize, Serialize};

/// One frame's category plus its confidence in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MappedReading {
    pub category: InterviewCategory,
    pub confidence: f64,
}

/// Round to `places` decimals, ties to even, on the exact decimal value of `value`
/// (0.25 -> 0.2, 0.125 -> 0.12).
pub fn round_to(value: f64, places: usize) -> f64 {
    format!("{:.*}", places, value).parse().unwrap_or(value)
}
