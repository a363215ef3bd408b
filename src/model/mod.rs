//! Affect classifier contract and adapters.
//!
//! The classifier is an external collaborator: given a frame it returns a dominant label,
//! the full label -> percentage map, and the face box, or fails. The engine only sees
//! [`RawClassification`] and [`ClassifyError`].

mod onnx;
mod replay;

pub use onnx::{GrayFrame, OnnxClassifier, FER_LABELS};
pub use replay::{ReplayClassifier, ReplayFrame};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Face bounding box in frame pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaceRegion {
    pub x: f64,
    pub y: f64,
    #[serde(alias = "w")]
    pub width: f64,
    #[serde(alias = "h")]
    pub height: f64,
}

/// One frame's classifier output. Scores are percentages and sum to roughly 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawClassification {
    pub dominant_emotion: String,
    pub emotion: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<FaceRegion>,
}

impl RawClassification {
    /// Raw score of the dominant label; 0.0 if the map lacks it.
    pub fn dominant_score(&self) -> f64 {
        self.emotion
            .get(&self.dominant_emotion)
            .copied()
            .unwrap_or(0.0)
    }

    /// min(1, (dominant + margin) / 200), margin being the lead over the runner-up.
    pub fn adjusted_confidence(&self) -> f64 {
        let dominant = self.dominant_score();
        let mut sorted: Vec<f64> = self.emotion.values().copied().collect();
        sorted.sort_by(|a, b| b.total_cmp(a));
        let second = sorted.get(1).copied().unwrap_or(0.0);
        let margin = dominant - second;
        ((dominant + margin) / 200.0).min(1.0)
    }

    /// Confidence used on the permissive fallback path: dominant / 100.
    pub fn plain_confidence(&self) -> f64 {
        self.dominant_score() / 100.0
    }
}

/// Detection strictness. `Permissive` is the lower-accuracy retry mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionMode {
    Strict,
    Permissive,
}

#[derive(Debug)]
pub enum ClassifyError {
    /// No face found in the frame
    NoFace(String),
    /// Backend, model, or input failure
    Failure(String),
}

impl fmt::Display for ClassifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassifyError::NoFace(msg) => write!(f, "No face detected: {}", msg),
            ClassifyError::Failure(msg) => write!(f, "Detection failed: {}", msg),
        }
    }
}

impl std::error::Error for ClassifyError {}

impl From<ort::OrtError> for ClassifyError {
    fn from(err: ort::OrtError) -> Self {
        ClassifyError::Failure(err.to_string())
    }
}

impl From<ndarray::ShapeError> for ClassifyError {
    fn from(err: ndarray::ShapeError) -> Self {
        ClassifyError::Failure(err.to_string())
    }
}

/// Facial-expression classifier seam.
pub trait AffectClassifier {
    /// Frame type the backend consumes.
    type Input;

    fn analyze(
        &self,
        input: &Self::Input,
        mode: DetectionMode,
    ) -> Result<RawClassification, ClassifyError>;
}
