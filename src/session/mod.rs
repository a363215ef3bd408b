//! Session aggregation: the append-only reading log and analytics derived from it.

mod analytics;

pub use analytics::{consistency, SessionAnalytics, Trend};

use crate::category::InterviewCategory;
use crate::config::ReportConfig;
use crate::features::MappedReading;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One logged frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionEntry {
    pub category: InterviewCategory,
    pub confidence: f64,
    /// Static feedback score of `category`
    pub score: u8,
    pub ts: DateTime<Utc>,
}

/// Every reading since the session started. Cleared only by [`SessionLog::restart`].
#[derive(Debug, Clone)]
pub struct SessionLog {
    id: Uuid,
    started_at: DateTime<Utc>,
    entries: Vec<SessionEntry>,
}

impl SessionLog {
    pub fn new() -> Self {
        Self::starting_at(Utc::now())
    }

    pub fn starting_at(started_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at,
            entries: Vec::new(),
        }
    }

    pub fn record(&mut self, reading: MappedReading, ts: DateTime<Utc>) {
        self.entries.push(SessionEntry {
            category: reading.category,
            confidence: reading.confidence,
            score: reading.category.score(),
            ts,
        });
    }

    /// Drop all entries and begin a new session with a fresh id.
    pub fn restart(&mut self, started_at: DateTime<Utc>) {
        self.entries.clear();
        self.id = Uuid::new_v4();
        self.started_at = started_at;
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn entries(&self) -> &[SessionEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Analytics as of `now`; None while the log is empty.
    pub fn analytics(&self, config: &ReportConfig, now: DateTime<Utc>) -> Option<SessionAnalytics> {
        SessionAnalytics::compute(self, config, now)
    }
}

impl Default for SessionLog {
    fn default() -> Self {
        Self::new()
    }
}
