//! Session-wide analytics, recomputed from the log on demand.

use super::SessionLog;
use crate::category::InterviewCategory;
use crate::config::ReportConfig;
use crate::features::round_to;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    InsufficientData,
    Improving,
    Declining,
    Stable,
}

impl Trend {
    /// Compares the mean score of the second half of the session against the first.
    /// The first half is `[0, n / 2)`.
    pub fn from_scores(scores: &[f64], min_readings: usize, delta: f64) -> Self {
        if scores.len() < min_readings.max(2) {
            return Trend::InsufficientData;
        }
        let (first, second) = scores.split_at(scores.len() / 2);
        let diff = mean(second) - mean(first);
        if diff > delta {
            Trend::Improving
        } else if diff < -delta {
            Trend::Declining
        } else {
            Trend::Stable
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionAnalytics {
    pub session_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub total_detections: usize,
    /// Percentage share per category, one decimal
    pub emotion_distribution: BTreeMap<InterviewCategory, f64>,
    pub average_score: f64,
    pub consistency_score: f64,
    /// Seconds since session start, one decimal
    pub session_duration: f64,
    pub dominant_emotion: InterviewCategory,
    pub performance_trend: Trend,
}

impl SessionAnalytics {
    pub fn compute(log: &SessionLog, config: &ReportConfig, now: DateTime<Utc>) -> Option<Self> {
        if log.is_empty() {
            return None;
        }
        let total = log.len();

        // Encounter order decides ties for the dominant category.
        let mut counts: Vec<(InterviewCategory, usize)> = Vec::new();
        for entry in log.entries() {
            match counts.iter_mut().find(|(c, _)| *c == entry.category) {
                Some((_, n)) => *n += 1,
                None => counts.push((entry.category, 1)),
            }
        }

        let emotion_distribution = counts
            .iter()
            .map(|&(c, n)| (c, round_to(n as f64 / total as f64 * 100.0, 1)))
            .collect();

        let mut dominant = counts[0];
        for &(c, n) in &counts[1..] {
            if n > dominant.1 {
                dominant = (c, n);
            }
        }

        let scores: Vec<f64> = log.entries().iter().map(|e| e.score as f64).collect();
        let session_duration = (now - log.started_at()).num_milliseconds() as f64 / 1000.0;

        Some(Self {
            session_id: log.id(),
            started_at: log.started_at(),
            total_detections: total,
            emotion_distribution,
            average_score: round_to(mean(&scores), 1),
            consistency_score: round_to(consistency(&scores), 1),
            session_duration: round_to(session_duration, 1),
            dominant_emotion: dominant.0,
            performance_trend: Trend::from_scores(
                &scores,
                config.min_trend_readings,
                config.trend_delta,
            ),
        })
    }

    /// Share of `category` in percent; 0.0 if never observed.
    pub fn share(&self, category: InterviewCategory) -> f64 {
        self.emotion_distribution
            .get(&category)
            .copied()
            .unwrap_or(0.0)
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// 100 minus the population standard deviation, floored at 0. Exactly 100 below two scores.
pub fn consistency(scores: &[f64]) -> f64 {
    if scores.len() < 2 {
        return 100.0;
    }
    let m = mean(scores);
    let variance = scores.iter().map(|s| (s - m).powi(2)).sum::<f64>() / scores.len() as f64;
    (100.0 - variance.sqrt()).max(0.0)
}
