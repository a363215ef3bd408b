//! Rule-based coaching advice. Every matching rule contributes; none matching yields praise.

use crate::category::InterviewCategory;
use crate::session::SessionAnalytics;

pub struct RecommendationRule {
    pub applies: fn(&SessionAnalytics) -> bool,
    pub advice: [&'static str; 2],
}

pub static RULES: [RecommendationRule; 5] = [
    RecommendationRule {
        applies: |a| a.share(InterviewCategory::Anxious) > 30.0,
        advice: [
            "Practice mock interviews to reduce anxiety",
            "Use deep breathing techniques before interviews",
        ],
    },
    RecommendationRule {
        applies: |a| a.share(InterviewCategory::LowEnergy) > 25.0,
        advice: [
            "Work on projecting enthusiasm and energy",
            "Research the company to build genuine excitement",
        ],
    },
    RecommendationRule {
        applies: |a| {
            a.share(InterviewCategory::Composed) > 50.0
                && a.share(InterviewCategory::Confident) < 20.0
        },
        advice: [
            "Show more personality - let your passion shine through",
            "Practice smiling naturally when discussing achievements",
        ],
    },
    RecommendationRule {
        applies: |a| a.share(InterviewCategory::Tense) > 15.0,
        advice: [
            "Practice relaxation techniques before interviews",
            "Reframe challenging questions positively",
        ],
    },
    RecommendationRule {
        applies: |a| a.consistency_score < 60.0,
        advice: [
            "Work on maintaining consistent emotional energy",
            "Practice emotional regulation techniques",
        ],
    },
];

const FALLBACK: [&str; 2] = [
    "Maintain your excellent interview presence!",
    "Keep practicing to stay sharp",
];

pub fn recommendations(analytics: &SessionAnalytics) -> Vec<&'static str> {
    let advice: Vec<&'static str> = RULES
        .iter()
        .filter(|rule| (rule.applies)(analytics))
        .flat_map(|rule| rule.advice)
        .collect();
    if advice.is_empty() {
        FALLBACK.to_vec()
    } else {
        advice
    }
}
