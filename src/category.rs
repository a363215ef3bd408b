//! Affect labels, interview categories, and the static feedback table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Primary affect class produced by the external classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AffectLabel {
    Happy,
    Sad,
    Neutral,
    Angry,
    Surprise,
    Fear,
}

impl AffectLabel {
    pub const ALL: [AffectLabel; 6] = [
        AffectLabel::Happy,
        AffectLabel::Sad,
        AffectLabel::Neutral,
        AffectLabel::Angry,
        AffectLabel::Surprise,
        AffectLabel::Fear,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AffectLabel::Happy => "happy",
            AffectLabel::Sad => "sad",
            AffectLabel::Neutral => "neutral",
            AffectLabel::Angry => "angry",
            AffectLabel::Surprise => "surprise",
            AffectLabel::Fear => "fear",
        }
    }
}

impl FromStr for AffectLabel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AffectLabel::ALL
            .into_iter()
            .find(|l| l.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or(())
    }
}

impl fmt::Display for AffectLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Interview-semantic reading derived from an affect label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewCategory {
    Confident,
    LowEnergy,
    Composed,
    Tense,
    Engaged,
    Anxious,
}

impl InterviewCategory {
    /// Fallback for unknown labels and empty windows.
    pub const DEFAULT: InterviewCategory = InterviewCategory::Composed;

    pub fn from_label(label: AffectLabel) -> Self {
        match label {
            AffectLabel::Happy => InterviewCategory::Confident,
            AffectLabel::Sad => InterviewCategory::LowEnergy,
            AffectLabel::Neutral => InterviewCategory::Composed,
            AffectLabel::Angry => InterviewCategory::Tense,
            AffectLabel::Surprise => InterviewCategory::Engaged,
            AffectLabel::Fear => InterviewCategory::Anxious,
        }
    }

    /// Map a raw classifier label; anything outside the six primary labels is `composed`.
    pub fn from_label_name(name: &str) -> Self {
        name.parse::<AffectLabel>()
            .map(Self::from_label)
            .unwrap_or(Self::DEFAULT)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            InterviewCategory::Confident => "confident",
            InterviewCategory::LowEnergy => "low_energy",
            InterviewCategory::Composed => "composed",
            InterviewCategory::Tense => "tense",
            InterviewCategory::Engaged => "engaged",
            InterviewCategory::Anxious => "anxious",
        }
    }

    pub fn feedback(self) -> &'static FeedbackEntry {
        match self {
            InterviewCategory::Confident => &FEEDBACK[0],
            InterviewCategory::Composed => &FEEDBACK[1],
            InterviewCategory::Anxious => &FEEDBACK[2],
            InterviewCategory::LowEnergy => &FEEDBACK[3],
            InterviewCategory::Tense => &FEEDBACK[4],
            InterviewCategory::Engaged => &FEEDBACK[5],
        }
    }

    /// Static feedback score (0-100) for this category.
    pub fn score(self) -> u8 {
        self.feedback().score
    }
}

impl fmt::Display for InterviewCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coaching text and score attached to a category.
#[derive(Debug, Serialize)]
pub struct FeedbackEntry {
    pub message: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
    pub score: u8,
    pub tips: &'static [&'static str],
    pub interview_impact: &'static str,
}

static FEEDBACK: [FeedbackEntry; 6] = [
    FeedbackEntry {
        message: "Excellent! You appear confident and enthusiastic.",
        icon: "\u{1F60A}",
        color: "success",
        score: 95,
        tips: &[
            "Your positive energy creates strong rapport",
            "This confidence level is ideal for interviews",
            "Maintain eye contact and this enthusiasm",
        ],
        interview_impact: "Very Positive - You're making a great impression",
    },
    FeedbackEntry {
        message: "You appear calm and professional.",
        icon: "\u{1F610}",
        color: "info",
        score: 75,
        tips: &[
            "Show slightly more enthusiasm about the opportunity",
            "Smile when discussing your achievements",
            "Let your passion for the role show through",
        ],
        interview_impact: "Neutral - Add more energy to stand out",
    },
    FeedbackEntry {
        message: "You seem nervous. Deep breaths - you've got this!",
        icon: "\u{1F630}",
        color: "warning",
        score: 50,
        tips: &[
            "Take 3 deep breaths before answering",
            "Remember: they want you to succeed",
            "Focus on your achievements, not your nerves",
            "Pause and smile before responding",
        ],
        interview_impact: "Needs Improvement - Nervousness is visible",
    },
    FeedbackEntry {
        message: "Your energy seems low. Are you feeling okay?",
        icon: "\u{1F614}",
        color: "warning",
        score: 45,
        tips: &[
            "Sit up straight to boost your energy",
            "Think of something that excites you about this role",
            "Recall a recent win to lift your mood",
            "Consider taking a short break if needed",
        ],
        interview_impact: "Concerning - Low energy may signal lack of interest",
    },
    FeedbackEntry {
        message: "You appear tense or frustrated. Let's reset.",
        icon: "\u{1F620}",
        color: "danger",
        score: 35,
        tips: &[
            "Relax your jaw and shoulders",
            "Take a 10-second pause to collect yourself",
            "Reframe challenging questions as opportunities",
            "Maintain professional composure",
        ],
        interview_impact: "Negative - Tension can be misinterpreted",
    },
    FeedbackEntry {
        message: "Great! You look interested and engaged.",
        icon: "\u{1F632}",
        color: "success",
        score: 85,
        tips: &[
            "Your active listening is showing",
            "This engagement demonstrates genuine interest",
            "Natural reactions build connection",
        ],
        interview_impact: "Positive - Shows authentic interest in the role",
    },
];
