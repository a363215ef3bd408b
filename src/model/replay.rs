//! Replays pre-computed classifier records, one per frame.

use super::{AffectClassifier, ClassifyError, DetectionMode, RawClassification};
use serde::{Deserialize, Serialize};

/// Error code marking a record where the classifier found no face.
pub const NO_FACE: &str = "no_face";

/// A recorded classifier result. Failure records may carry what the permissive mode returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReplayFrame {
    Classified(RawClassification),
    Error {
        error: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fallback: Option<RawClassification>,
    },
}

impl ReplayFrame {
    pub fn no_face() -> Self {
        ReplayFrame::Error {
            error: NO_FACE.to_string(),
            fallback: None,
        }
    }

    pub fn failure(error: impl Into<String>, fallback: Option<RawClassification>) -> Self {
        ReplayFrame::Error {
            error: error.into(),
            fallback,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ReplayClassifier;

impl ReplayClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl AffectClassifier for ReplayClassifier {
    type Input = ReplayFrame;

    fn analyze(
        &self,
        input: &ReplayFrame,
        mode: DetectionMode,
    ) -> Result<RawClassification, ClassifyError> {
        match (input, mode) {
            (ReplayFrame::Classified(raw), _) => Ok(raw.clone()),
            (ReplayFrame::Error { error, .. }, DetectionMode::Strict) if error == NO_FACE => {
                Err(ClassifyError::NoFace(error.clone()))
            }
            (ReplayFrame::Error { error, .. }, DetectionMode::Strict) => {
                Err(ClassifyError::Failure(error.clone()))
            }
            (ReplayFrame::Error { fallback: Some(raw), .. }, DetectionMode::Permissive) => {
                Ok(raw.clone())
            }
            (ReplayFrame::Error { error, fallback: None }, DetectionMode::Permissive) => {
                Err(ClassifyError::Failure(error.clone()))
            }
        }
    }
}
