//! Session analytics engine: classifier output -> mapped reading -> smoothing -> metrics,
//! with every reading logged for the session report.
//!
//! All mutable state sits behind one mutex so a detection, a reset, or a report each see
//! a consistent snapshot. The classifier runs outside the lock.

use crate::category::{FeedbackEntry, InterviewCategory};
use crate::config::AnalyticsConfig;
use crate::features::{round_to, BehaviorMetrics, MappedReading, MetricCalculator, TemporalSmoother};
use crate::model::{AffectClassifier, ClassifyError, DetectionMode, RawClassification};
use crate::report::{ReportEngine, SessionReport};
use crate::session::{SessionAnalytics, SessionLog};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

pub const NO_FACE_MESSAGE: &str = "No face detected - please position yourself clearly in frame";
pub const FAILURE_MESSAGE: &str = "Detection failed - please ensure good lighting";

/// Everything the caller gets back for a successfully classified frame.
#[derive(Debug, Clone, Serialize)]
pub struct FrameAnalysis {
    pub category: InterviewCategory,
    pub confidence: f64,
    pub smoothed_category: InterviewCategory,
    pub smoothed_confidence: f64,
    /// Raw classifier label -> percentage map
    pub scores: BTreeMap<String, f64>,
    /// Feedback for the smoothed category
    pub feedback: &'static FeedbackEntry,
    pub interview_score: u8,
    pub metrics: BehaviorMetrics,
    pub analytics: SessionAnalytics,
    /// Produced by the permissive retry. Fallback frames are logged and count toward the report.
    pub fallback: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DetectionOutcome {
    Detected(Box<FrameAnalysis>),
    NoFace { error: &'static str },
    Failed { error: &'static str },
}

impl DetectionOutcome {
    pub fn face_detected(&self) -> bool {
        matches!(self, DetectionOutcome::Detected(_))
    }

    pub fn analysis(&self) -> Option<&FrameAnalysis> {
        match self {
            DetectionOutcome::Detected(a) => Some(a),
            _ => None,
        }
    }
}

/// How the per-frame confidence is derived from the raw map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfidenceMode {
    Adjusted,
    Plain,
}

struct EngineState {
    smoother: TemporalSmoother,
    metrics: MetricCalculator,
    log: SessionLog,
}

pub struct SessionEngine {
    config: AnalyticsConfig,
    reports: ReportEngine,
    state: Mutex<EngineState>,
}

impl SessionEngine {
    pub fn new(config: AnalyticsConfig) -> Self {
        let config = config.normalized();
        let state = EngineState {
            smoother: TemporalSmoother::new(&config.smoothing),
            metrics: MetricCalculator::new(&config.metrics),
            log: SessionLog::new(),
        };
        tracing::info!(
            session_id = %state.log.id(),
            emotion_window = config.smoothing.emotion_window,
            metric_window = config.metrics.window,
            "session analytics engine initialized"
        );
        Self {
            reports: ReportEngine::new(config.report.clone()),
            config,
            state: Mutex::new(state),
        }
    }

    fn lock(&self) -> MutexGuard<'_, EngineState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Classify a frame and fold it into the session.
    ///
    /// A strict-mode "no face" is reported as is. Any other strict failure is retried once
    /// in permissive mode. Frames that end in `NoFace` or `Failed` leave all state untouched.
    pub fn detect<C: AffectClassifier>(&self, classifier: &C, input: &C::Input) -> DetectionOutcome {
        match classifier.analyze(input, DetectionMode::Strict) {
            Ok(raw) => self.ingest(&raw, ConfidenceMode::Adjusted),
            Err(ClassifyError::NoFace(reason)) => {
                tracing::warn!(reason = %reason, "no face detected");
                DetectionOutcome::NoFace {
                    error: NO_FACE_MESSAGE,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "detection failed; retrying in permissive mode");
                match classifier.analyze(input, DetectionMode::Permissive) {
                    Ok(raw) => self.ingest(&raw, ConfidenceMode::Plain),
                    Err(e) => {
                        tracing::error!(error = %e, "fallback detection failed");
                        DetectionOutcome::Failed {
                            error: FAILURE_MESSAGE,
                        }
                    }
                }
            }
        }
    }

    /// Fold an already-classified frame into the session.
    pub fn ingest_classification(&self, raw: &RawClassification) -> DetectionOutcome {
        self.ingest(raw, ConfidenceMode::Adjusted)
    }

    fn ingest(&self, raw: &RawClassification, mode: ConfidenceMode) -> DetectionOutcome {
        let category = InterviewCategory::from_label_name(&raw.dominant_emotion);
        let confidence = match mode {
            ConfidenceMode::Adjusted => raw.adjusted_confidence(),
            ConfidenceMode::Plain => raw.plain_confidence(),
        };
        let reading = MappedReading {
            category,
            confidence,
        };
        let mut state = self.lock();
        // Taken under the lock so no reset can start the session after this reading.
        let now = Utc::now();
        state.smoother.push(reading);
        state.log.record(reading, now);

        let smoothed_category = state.smoother.category();
        let smoothed_confidence = state.smoother.confidence();
        let metrics = state.metrics.update(&raw.emotion, raw.region.as_ref());
        let analytics = state.log.analytics(&self.config.report, now);
        let session_id = state.log.id();
        drop(state);

        let Some(analytics) = analytics else {
            // The log was appended to above, so this cannot be empty.
            return DetectionOutcome::Failed {
                error: FAILURE_MESSAGE,
            };
        };
        tracing::debug!(
            session_id = %session_id,
            category = %category,
            smoothed = %smoothed_category,
            total_detections = analytics.total_detections,
            "frame analyzed"
        );

        let feedback = smoothed_category.feedback();
        DetectionOutcome::Detected(Box::new(FrameAnalysis {
            category,
            confidence: round_to(confidence, 2),
            smoothed_category,
            smoothed_confidence: round_to(smoothed_confidence, 2),
            scores: raw.emotion.clone(),
            feedback,
            interview_score: feedback.score,
            metrics,
            analytics,
            fallback: mode == ConfidenceMode::Plain,
        }))
    }

    /// Clear every window, the position trace, and the log; start a new session clock.
    pub fn reset(&self) {
        let mut state = self.lock();
        let now = Utc::now();
        Self::restart(&mut state, now);
    }

    pub fn reset_at(&self, now: DateTime<Utc>) {
        let mut state = self.lock();
        Self::restart(&mut state, now);
    }

    fn restart(state: &mut EngineState, now: DateTime<Utc>) {
        state.smoother.clear();
        state.metrics.clear();
        state.log.restart(now);
        tracing::info!(session_id = %state.log.id(), "session reset - new interview session started");
    }

    pub fn analytics(&self) -> Option<SessionAnalytics> {
        let state = self.lock();
        state.log.analytics(&self.config.report, Utc::now())
    }

    pub fn analytics_at(&self, now: DateTime<Utc>) -> Option<SessionAnalytics> {
        self.lock().log.analytics(&self.config.report, now)
    }

    /// None until the session has at least one reading.
    pub fn session_report(&self) -> Option<SessionReport> {
        self.analytics().map(|a| self.reports.report(a))
    }

    pub fn session_id(&self) -> Uuid {
        self.lock().log.id()
    }

    pub fn total_detections(&self) -> usize {
        self.lock().log.len()
    }
}

impl Default for SessionEngine {
    fn default() -> Self {
        Self::new(AnalyticsConfig::default())
    }
}
