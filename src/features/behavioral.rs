//! Interview behavior metrics derived from the raw affect distribution and face-position trace.

use super::{round_to, RollingWindow};
use crate::category::AffectLabel;
use crate::config::MetricsConfig;
use crate::model::FaceRegion;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Eye contact score while the position trace is too short to judge.
pub const NEUTRAL_EYE_CONTACT: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Confidence,
    Nervousness,
    Engagement,
    Positivity,
    Focus,
    EyeContact,
    Stability,
    Distraction,
}

impl Metric {
    pub const ALL: [Metric; 8] = [
        Metric::Confidence,
        Metric::Nervousness,
        Metric::Engagement,
        Metric::Positivity,
        Metric::Focus,
        Metric::EyeContact,
        Metric::Stability,
        Metric::Distraction,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// Eight smoothed scores, each in [0, 100].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BehaviorMetrics {
    pub confidence: f64,
    pub nervousness: f64,
    pub engagement: f64,
    pub positivity: f64,
    pub focus: f64,
    pub eye_contact: f64,
    pub stability: f64,
    pub distraction: f64,
}

impl BehaviorMetrics {
    fn from_array(v: [f64; 8]) -> Self {
        Self {
            confidence: v[0],
            nervousness: v[1],
            engagement: v[2],
            positivity: v[3],
            focus: v[4],
            eye_contact: v[5],
            stability: v[6],
            distraction: v[7],
        }
    }

    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Confidence => self.confidence,
            Metric::Nervousness => self.nervousness,
            Metric::Engagement => self.engagement,
            Metric::Positivity => self.positivity,
            Metric::Focus => self.focus,
            Metric::EyeContact => self.eye_contact,
            Metric::Stability => self.stability,
            Metric::Distraction => self.distraction,
        }
    }
}

/// Primary affect probabilities normalized to [0, 1]. Labels missing from the map count as 0.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AffectProbabilities {
    pub happy: f64,
    pub sad: f64,
    pub neutral: f64,
    pub angry: f64,
    pub surprise: f64,
    pub fear: f64,
}

impl AffectProbabilities {
    /// From a classifier map of label -> percentage (0-100). Non-primary labels are ignored.
    pub fn from_percentages(scores: &BTreeMap<String, f64>) -> Self {
        let mut p = Self::default();
        for (name, value) in scores {
            let Ok(label) = name.parse::<AffectLabel>() else {
                continue;
            };
            let v = value / 100.0;
            match label {
                AffectLabel::Happy => p.happy = v,
                AffectLabel::Sad => p.sad = v,
                AffectLabel::Neutral => p.neutral = v,
                AffectLabel::Angry => p.angry = v,
                AffectLabel::Surprise => p.surprise = v,
                AffectLabel::Fear => p.fear = v,
            }
        }
        p
    }

    fn values(&self) -> [f64; 6] {
        [self.happy, self.sad, self.neutral, self.angry, self.surprise, self.fear]
    }
}

/// Face box origin recorded in the position trace.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FacePosition {
    pub x: f64,
    pub y: f64,
}

/// Unsmoothed per-frame scores, clamped to [0, 100]. `eye_contact` is the raw trace score.
pub fn raw_metrics(p: &AffectProbabilities, eye_contact: f64) -> BehaviorMetrics {
    let confidence = 100.0 * p.happy + 30.0 * p.neutral - 50.0 * p.fear - 40.0 * p.sad;
    let nervousness = 100.0 * p.fear + 40.0 * p.angry + 30.0 * p.sad - 20.0 * p.happy;
    let engagement = 80.0 * p.surprise + 60.0 * p.happy - 40.0 * p.neutral - 50.0 * p.sad;
    let positivity = 100.0 * p.happy + 20.0 * p.surprise - 60.0 * p.sad - 70.0 * p.angry;
    let focus = 60.0 * p.neutral + 40.0 * p.happy - 30.0 * p.surprise - 40.0 * p.fear;
    let spread: f64 = p.values().iter().map(|v| (v - 0.5).abs()).sum();
    let stability = 100.0 - 40.0 * spread;
    let distraction =
        50.0 * p.surprise + 40.0 * p.fear + 0.5 * (100.0 - eye_contact) - 30.0 * p.neutral;

    BehaviorMetrics::from_array(
        [
            confidence,
            nervousness,
            engagement,
            positivity,
            focus,
            eye_contact,
            stability,
            distraction,
        ]
        .map(clamp_score),
    )
}

fn clamp_score(v: f64) -> f64 {
    v.clamp(0.0, 100.0)
}

fn population_variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n
}

/// Computes and smooths the eight behavior metrics frame by frame.
pub struct MetricCalculator {
    min_positions: usize,
    windows: [RollingWindow<f64>; 8],
    positions: RollingWindow<FacePosition>,
}

impl MetricCalculator {
    pub fn new(config: &MetricsConfig) -> Self {
        Self {
            min_positions: config.min_positions,
            windows: std::array::from_fn(|_| RollingWindow::new(config.window)),
            positions: RollingWindow::new(config.position_window),
        }
    }

    /// Feed one frame; returns each metric's weighted moving average rounded to one decimal.
    pub fn update(
        &mut self,
        scores: &BTreeMap<String, f64>,
        region: Option<&FaceRegion>,
    ) -> BehaviorMetrics {
        let probabilities = AffectProbabilities::from_percentages(scores);
        let eye_contact = self.eye_contact(region);
        let raw = raw_metrics(&probabilities, eye_contact);

        let mut smoothed = [0.0; 8];
        for metric in Metric::ALL {
            let window = &mut self.windows[metric.index()];
            window.push(raw.get(metric));
            smoothed[metric.index()] = round_to(window.weighted_mean(), 1);
        }
        BehaviorMetrics::from_array(smoothed)
    }

    /// Positional steadiness of the face box: clamp(100 - (var(x) + var(y)) / 10).
    fn eye_contact(&mut self, region: Option<&FaceRegion>) -> f64 {
        let Some(region) = region.filter(|r| r.x.is_finite() && r.y.is_finite()) else {
            return NEUTRAL_EYE_CONTACT;
        };
        self.positions.push(FacePosition {
            x: region.x,
            y: region.y,
        });
        if self.positions.len() < self.min_positions {
            return NEUTRAL_EYE_CONTACT;
        }

        let xs: Vec<f64> = self.positions.iter().map(|p| p.x).collect();
        let ys: Vec<f64> = self.positions.iter().map(|p| p.y).collect();
        let variance = population_variance(&xs) + population_variance(&ys);
        clamp_score(100.0 - variance / 10.0)
    }

    pub fn positions(&self) -> usize {
        self.positions.len()
    }

    pub fn clear(&mut self) {
        for w in &mut self.windows {
            w.clear();
        }
        self.positions.clear();
    }
}
