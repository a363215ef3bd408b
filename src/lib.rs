//! Interview analytics — scores a candidate's emotional presentation from a live video feed.
//!
//! Modular structure:
//! - [`category`] — Affect labels, interview categories, feedback table
//! - [`features`] — Rolling windows, temporal smoothing, behavior metrics
//! - [`session`] — Session log and aggregate analytics
//! - [`report`] — Grade, summary, recommendations
//! - [`model`] — Classifier contract, replay and ONNX adapters
//! - [`engine`] — Stateful session analytics engine
//! - [`stream`] — JSON-lines frame stream and report output
//! - [`logging`] — Structured JSON logging

pub mod config;
pub mod category;
pub mod features;
pub mod session;
pub mod report;
pub mod model;
pub mod engine;
pub mod stream;
pub mod logging;

pub use config::AnalyticsConfig;
pub use category::{AffectLabel, FeedbackEntry, InterviewCategory};
pub use features::{BehaviorMetrics, MappedReading, RollingWindow};
pub use session::{SessionAnalytics, SessionLog, Trend};
pub use report::{Grade, ReportEngine, SessionReport};
pub use model::{AffectClassifier, ClassifyError, DetectionMode, FaceRegion, RawClassification};
pub use engine::{DetectionOutcome, FrameAnalysis, SessionEngine};
pub use logging::StructuredLogger;
