//! ONNX Runtime facial-expression classifier (FER-style model).
//! Input: [1, 1, N, N] grayscale in [0, 1]. Output: 7 logits in [`FER_LABELS`] order.
//! If the model file is missing, loads in no-op mode and every frame fails.

use super::{AffectClassifier, ClassifyError, DetectionMode, FaceRegion, RawClassification};
use ndarray::{Array4, CowArray};
use ort::tensor::OrtOwnedTensor;
use ort::{Environment, Session, SessionBuilder, Value};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

/// Output order of FER2013-trained expression models.
pub const FER_LABELS: [&str; 7] = [
    "angry", "disgust", "fear", "happy", "sad", "surprise", "neutral",
];

/// Row-major luminance frame with an optional face box from an upstream detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrayFrame {
    pub width: usize,
    pub height: usize,
    /// Luminance, either 0-255 or 0-1
    pub pixels: Vec<f32>,
    #[serde(default)]
    pub face: Option<FaceRegion>,
}

impl GrayFrame {
    fn full_region(&self) -> FaceRegion {
        FaceRegion {
            x: 0.0,
            y: 0.0,
            width: self.width as f64,
            height: self.height as f64,
        }
    }

    /// Nearest-neighbour crop of `region` resized to `size`x`size`, scaled to [0, 1].
    /// Returns None when the region misses the frame.
    fn crop_resized(&self, region: &FaceRegion, size: usize) -> Option<Vec<f32>> {
        let x0 = region.x.max(0.0).floor() as usize;
        let y0 = region.y.max(0.0).floor() as usize;
        let x1 = ((region.x + region.width).ceil().max(0.0) as usize).min(self.width);
        let y1 = ((region.y + region.height).ceil().max(0.0) as usize).min(self.height);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        let (cw, ch) = (x1 - x0, y1 - y0);
        let scale = if self.pixels.iter().any(|p| *p > 1.0) {
            255.0
        } else {
            1.0
        };

        let mut out = Vec::with_capacity(size * size);
        for row in 0..size {
            let sy = y0 + row * ch / size;
            for col in 0..size {
                let sx = x0 + col * cw / size;
                out.push(self.pixels[sy * self.width + sx] / scale);
            }
        }
        Some(out)
    }
}

/// Min-max contrast stretch to the full [0, 1] range.
fn stretch_contrast(pixels: &mut [f32]) {
    let (lo, hi) = pixels
        .iter()
        .fold((f32::MAX, f32::MIN), |(lo, hi), p| (lo.min(*p), hi.max(*p)));
    let range = hi - lo;
    if range <= f32::EPSILON {
        return;
    }
    for p in pixels.iter_mut() {
        *p = (*p - lo) / range;
    }
}

/// Softmax over logits, as percentages keyed by FER label.
fn to_percentages(logits: &[f32]) -> BTreeMap<String, f64> {
    let max = logits.iter().copied().fold(f32::MIN, f32::max);
    let exps: Vec<f64> = logits.iter().map(|l| ((l - max) as f64).exp()).collect();
    let total: f64 = exps.iter().sum();
    FER_LABELS
        .iter()
        .zip(exps)
        .map(|(label, e)| (label.to_string(), e / total * 100.0))
        .collect()
}

pub struct OnnxClassifier {
    session: Option<Session>,
    _environment: Option<Arc<Environment>>,
    input_size: usize,
}

impl OnnxClassifier {
    /// Load model from path. If path missing, the classifier runs in no-op mode.
    pub fn load(path: &Path, input_size: usize) -> Result<Self, ClassifyError> {
        let input_size = input_size.max(1);
        if !path.exists() {
            tracing::warn!(path = %path.display(), "ONNX model not found; classification disabled");
            return Ok(Self {
                session: None,
                _environment: None,
                input_size,
            });
        }

        let environment = Environment::builder()
            .with_name("interview-analytics")
            .build()?
            .into_arc();
        let session = SessionBuilder::new(&environment)?.with_model_from_file(path)?;
        tracing::info!(path = %path.display(), input_size, "ONNX expression model loaded");

        Ok(Self {
            session: Some(session),
            _environment: Some(environment),
            input_size,
        })
    }

    pub fn is_loaded(&self) -> bool {
        self.session.is_some()
    }

    fn infer(&self, session: &Session, pixels: Vec<f32>) -> Result<Vec<f32>, ClassifyError> {
        let n = self.input_size;
        let array = CowArray::from(Array4::from_shape_vec((1, 1, n, n), pixels)?.into_dyn());
        let input = Value::from_array(session.allocator(), &array)?;
        let outputs = session.run(vec![input])?;
        let first = outputs
            .first()
            .ok_or_else(|| ClassifyError::Failure("model produced no output".to_string()))?;
        let tensor: OrtOwnedTensor<f32, _> = first.try_extract()?;
        let logits: Vec<f32> = tensor.view().iter().copied().collect();
        Ok(logits)
    }
}

impl AffectClassifier for OnnxClassifier {
    type Input = GrayFrame;

    fn analyze(
        &self,
        frame: &GrayFrame,
        mode: DetectionMode,
    ) -> Result<RawClassification, ClassifyError> {
        let Some(session) = self.session.as_ref() else {
            return Err(ClassifyError::Failure("no model loaded".to_string()));
        };
        if frame.width == 0 || frame.height == 0 || frame.pixels.len() != frame.width * frame.height
        {
            return Err(ClassifyError::Failure(format!(
                "frame is {}x{} but carries {} pixels",
                frame.width,
                frame.height,
                frame.pixels.len()
            )));
        }

        let region = match (mode, frame.face) {
            (_, Some(face)) => face,
            (DetectionMode::Strict, None) => {
                return Err(ClassifyError::NoFace("no face box in frame".to_string()))
            }
            (DetectionMode::Permissive, None) => frame.full_region(),
        };
        let Some(mut pixels) = frame.crop_resized(&region, self.input_size) else {
            return Err(ClassifyError::NoFace("face box outside frame".to_string()));
        };
        if mode == DetectionMode::Strict {
            stretch_contrast(&mut pixels);
        }

        let logits = self.infer(session, pixels)?;
        if logits.len() != FER_LABELS.len() {
            return Err(ClassifyError::Failure(format!(
                "expected {} logits, model returned {}",
                FER_LABELS.len(),
                logits.len()
            )));
        }

        let emotion = to_percentages(&logits);
        let dominant_emotion = emotion
            .iter()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(label, _)| label.clone())
            .unwrap_or_else(|| "neutral".to_string());

        Ok(RawClassification {
            dominant_emotion,
            emotion,
            region: Some(region),
        })
    }
}
