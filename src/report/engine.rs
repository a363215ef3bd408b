//! Grades a session's average score against configurable thresholds and assembles the report.

use super::recommend::recommendations;
use crate::config::ReportConfig;
use crate::session::SessionAnalytics;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A - Excellent")]
    Excellent,
    #[serde(rename = "B - Good")]
    Good,
    #[serde(rename = "C - Fair")]
    Fair,
    #[serde(rename = "D - Needs Improvement")]
    NeedsImprovement,
}

impl Grade {
    pub fn from_score(average_score: f64, config: &ReportConfig) -> Self {
        if average_score >= config.excellent_threshold {
            Grade::Excellent
        } else if average_score >= config.good_threshold {
            Grade::Good
        } else if average_score >= config.fair_threshold {
            Grade::Fair
        } else {
            Grade::NeedsImprovement
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Grade::Excellent => "A - Excellent",
            Grade::Good => "B - Good",
            Grade::Fair => "C - Fair",
            Grade::NeedsImprovement => "D - Needs Improvement",
        }
    }

    pub fn summary(self) -> &'static str {
        match self {
            Grade::Excellent => {
                "Outstanding interview presence! You demonstrated strong confidence and engagement."
            }
            Grade::Good => "Good interview performance. With slight improvements, you'll excel.",
            Grade::Fair => {
                "Fair performance. Focus on managing anxiety and showing more enthusiasm."
            }
            Grade::NeedsImprovement => {
                "Your interview presence needs work. Practice emotional regulation and confidence building."
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub grade: Grade,
    pub summary: &'static str,
    pub analytics: SessionAnalytics,
    pub recommendations: Vec<&'static str>,
}

pub struct ReportEngine {
    config: ReportConfig,
}

impl ReportEngine {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    pub fn report(&self, analytics: SessionAnalytics) -> SessionReport {
        let grade = Grade::from_score(analytics.average_score, &self.config);
        SessionReport {
            grade,
            summary: grade.summary(),
            recommendations: recommendations(&analytics),
            analytics,
        }
    }
}
