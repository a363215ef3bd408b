//! Session report: letter grade, narrative summary, recommendations.

mod engine;
mod recommend;

pub use engine::{Grade, ReportEngine, SessionReport};
pub use recommend::{recommendations, RecommendationRule, RULES};
