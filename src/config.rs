//! Engine configuration. Window sizes, grading thresholds, classifier backend, logging.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable pointing at a JSON config file.
pub const CONFIG_ENV: &str = "INTERVIEW_ANALYTICS_CONFIG";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Emotion / confidence smoothing
    pub smoothing: SmoothingConfig,
    /// Behavior metric smoothing and face-position trace
    pub metrics: MetricsConfig,
    /// Grade and trend thresholds
    pub report: ReportConfig,
    /// Affect classifier backend
    pub classifier: ClassifierConfig,
    /// Logging
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingConfig {
    /// Rolling window size for categorical and confidence readings
    pub emotion_window: usize,
    /// Extra votes given to each of the two most recent readings
    pub recent_weight: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Rolling window size per behavior metric
    pub window: usize,
    /// Face-position trace length used for eye contact
    pub position_window: usize,
    /// Positions required before eye contact leaves its neutral default
    pub min_positions: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Average score at or above this grades "A - Excellent"
    pub excellent_threshold: f64,
    /// Average score at or above this grades "B - Good"
    pub good_threshold: f64,
    /// Average score at or above this grades "C - Fair"
    pub fair_threshold: f64,
    /// Half-over-half score delta that counts as a trend
    pub trend_delta: f64,
    /// Readings needed before a trend is reported
    pub min_trend_readings: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierBackend {
    /// Pre-computed classifier records (JSON lines)
    Replay,
    /// Local ONNX facial-expression model
    Onnx,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub backend: ClassifierBackend,
    /// Path to the ONNX expression model (onnx backend only)
    pub model_path: PathBuf,
    /// Square input side expected by the model
    pub input_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            emotion_window: 7,
            recent_weight: 2,
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            window: 5,
            position_window: 10,
            min_positions: 3,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            excellent_threshold: 85.0,
            good_threshold: 70.0,
            fair_threshold: 55.0,
            trend_delta: 5.0,
            min_trend_readings: 4,
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            backend: ClassifierBackend::Replay,
            model_path: PathBuf::from("emotion.onnx"),
            input_size: 48,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: true,
        }
    }
}

impl AnalyticsConfig {
    /// Load from JSON file if present; otherwise return default
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match std::fs::read_to_string(path) {
            Ok(data) => match serde_json::from_str::<AnalyticsConfig>(&data) {
                Ok(c) => c.normalized(),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "invalid config; using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "unreadable config; using defaults");
                Self::default()
            }
        }
    }

    /// Env var, then the per-user config dir, then `config.json` in the working directory.
    pub fn resolve_path() -> PathBuf {
        if let Ok(p) = std::env::var(CONFIG_ENV) {
            return PathBuf::from(p);
        }
        if let Some(dir) = dirs::config_dir() {
            let candidate = dir.join("interview-analytics").join("config.json");
            if candidate.exists() {
                return candidate;
            }
        }
        PathBuf::from("config.json")
    }

    /// Zero-capacity windows are raised to 1.
    pub fn normalized(mut self) -> Self {
        self.smoothing.emotion_window = self.smoothing.emotion_window.max(1);
        self.metrics.window = self.metrics.window.max(1);
        self.metrics.position_window = self.metrics.position_window.max(1);
        self.classifier.input_size = self.classifier.input_size.max(1);
        self
    }
}
