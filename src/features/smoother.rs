//! Temporal smoothing of categorical readings and confidences.

use super::{MappedReading, RollingWindow};
use crate::category::InterviewCategory;
use crate::config::SmoothingConfig;

/// Number of most recent readings that receive extra votes.
const RECENT_READINGS: usize = 2;

pub struct TemporalSmoother {
    recent_weight: usize,
    categories: RollingWindow<InterviewCategory>,
    confidences: RollingWindow<f64>,
}

impl TemporalSmoother {
    pub fn new(config: &SmoothingConfig) -> Self {
        Self {
            recent_weight: config.recent_weight,
            categories: RollingWindow::new(config.emotion_window),
            confidences: RollingWindow::new(config.emotion_window),
        }
    }

    pub fn push(&mut self, reading: MappedReading) {
        self.categories.push(reading.category);
        self.confidences.push(reading.confidence);
    }

    /// Weighted majority vote over the window.
    ///
    /// Every reading votes once; when the window holds at least two readings the two
    /// most recent each vote `recent_weight` extra times. A single reading is a plain
    /// single vote. Ties go to the category encountered first, oldest reading first.
    pub fn category(&self) -> InterviewCategory {
        if self.categories.is_empty() {
            return InterviewCategory::DEFAULT;
        }

        let mut counts: Vec<(InterviewCategory, usize)> = Vec::with_capacity(6);
        let mut vote = |category: InterviewCategory, votes: usize| {
            match counts.iter_mut().find(|(c, _)| *c == category) {
                Some((_, n)) => *n += votes,
                None => counts.push((category, votes)),
            }
        };

        for c in self.categories.iter() {
            vote(*c, 1);
        }
        if self.categories.len() >= RECENT_READINGS {
            let skip = self.categories.len() - RECENT_READINGS;
            for c in self.categories.iter().skip(skip) {
                vote(*c, self.recent_weight);
            }
        }

        let mut best: Option<(InterviewCategory, usize)> = None;
        for &(c, n) in &counts {
            if best.map_or(true, |(_, top)| n > top) {
                best = Some((c, n));
            }
        }
        best.map(|(c, _)| c).unwrap_or(InterviewCategory::DEFAULT)
    }

    /// Linearly recency-weighted mean of the confidence window; 0.0 when empty.
    pub fn confidence(&self) -> f64 {
        self.confidences.weighted_mean()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn clear(&mut self) {
        self.categories.clear();
        self.confidences.clear();
    }
}
