//! Session aggregation, trend, grading, and recommendation rules.

use chrono::{Duration, TimeZone, Utc};
use interview_analytics::config::ReportConfig;
use interview_analytics::features::MappedReading;
use interview_analytics::report::{recommendations, ReportEngine};
use interview_analytics::session::consistency;
use interview_analytics::InterviewCategory::{self, *};
use interview_analytics::{Grade, SessionAnalytics, SessionLog, Trend};
use std::collections::BTreeMap;
use uuid::Uuid;

fn log_of(categories: &[InterviewCategory]) -> SessionLog {
    let start = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
    let mut log = SessionLog::starting_at(start);
    for (i, c) in categories.iter().enumerate() {
        log.record(
            MappedReading {
                category: *c,
                confidence: 0.8,
            },
            start + Duration::seconds(i as i64),
        );
    }
    log
}

fn analytics_of(categories: &[InterviewCategory]) -> Option<SessionAnalytics> {
    let log = log_of(categories);
    let now = log.started_at() + Duration::milliseconds(12_340);
    log.analytics(&ReportConfig::default(), now)
}

fn analytics_with(shares: &[(InterviewCategory, f64)], consistency_score: f64) -> SessionAnalytics {
    SessionAnalytics {
        session_id: Uuid::nil(),
        started_at: Utc::now(),
        total_detections: 10,
        emotion_distribution: shares.iter().copied().collect::<BTreeMap<_, _>>(),
        average_score: 70.0,
        consistency_score,
        session_duration: 10.0,
        dominant_emotion: shares.first().map(|s| s.0).unwrap_or(Composed),
        performance_trend: Trend::Stable,
    }
}

#[test]
fn empty_log_has_no_analytics() {
    assert!(analytics_of(&[]).is_none());
}

#[test]
fn single_entry_is_fully_consistent() {
    let a = analytics_of(&[Tense]).unwrap();
    assert_eq!(a.total_detections, 1);
    assert_eq!(a.consistency_score, 100.0);
    assert_eq!(a.average_score, 35.0);
    assert_eq!(a.dominant_emotion, Tense);
    assert_eq!(a.share(Tense), 100.0);
    assert_eq!(a.performance_trend, Trend::InsufficientData);
    assert_eq!(a.session_duration, 12.3);
}

#[test]
fn consistency_is_hundred_minus_std_dev() {
    assert_eq!(consistency(&[]), 100.0);
    assert_eq!(consistency(&[42.0]), 100.0);
    // mean 65, population std dev 30
    let a = analytics_of(&[Confident, Tense]).unwrap();
    assert_eq!(a.consistency_score, 70.0);
    assert_eq!(a.average_score, 65.0);
    assert_eq!(consistency(&[0.0, 300.0]), 0.0);
}

#[test]
fn trend_needs_four_readings() {
    for n in 0..4 {
        let cats = vec![Confident; n];
        let scores: Vec<f64> = cats.iter().map(|c| c.score() as f64).collect();
        assert_eq!(Trend::from_scores(&scores, 4, 5.0), Trend::InsufficientData);
    }
}

#[test]
fn trend_compares_halves() {
    assert_eq!(Trend::from_scores(&[50.0, 50.0, 95.0, 95.0], 4, 5.0), Trend::Improving);
    assert_eq!(Trend::from_scores(&[95.0, 95.0, 50.0, 50.0], 4, 5.0), Trend::Declining);
    assert_eq!(Trend::from_scores(&[75.0, 75.0, 75.0, 80.0], 4, 5.0), Trend::Stable);
    // first half is [0, n / 2): 95 vs mean(50, 50, 50)
    assert_eq!(Trend::from_scores(&[95.0, 95.0, 50.0, 50.0, 50.0], 4, 5.0), Trend::Declining);

    let a = analytics_of(&[Anxious, Anxious, Confident, Confident]).unwrap();
    assert_eq!(a.performance_trend, Trend::Improving);
}

#[test]
fn distribution_sums_to_hundred() {
    let cases: [&[InterviewCategory]; 4] = [
        &[Confident, Tense, Anxious],
        &[Composed, Composed, Engaged, LowEnergy, Tense, Anxious, Confident],
        &[Engaged; 9],
        &[Composed, Tense, Tense, Tense, Anxious, Anxious],
    ];
    for cats in cases {
        let a = analytics_of(cats).unwrap();
        let total: f64 = a.emotion_distribution.values().sum();
        assert!((total - 100.0).abs() <= 0.1 + 1e-9, "{:?} sums to {}", cats, total);
    }
}

#[test]
fn dominant_ties_go_to_first_encountered() {
    let a = analytics_of(&[Engaged, Tense, Tense, Engaged]).unwrap();
    assert_eq!(a.dominant_emotion, Engaged);
    let a = analytics_of(&[Tense, Engaged, Engaged]).unwrap();
    assert_eq!(a.dominant_emotion, Engaged);
}

#[test]
fn analytics_carry_session_identity() {
    let log = log_of(&[Composed]);
    let a = log.analytics(&ReportConfig::default(), log.started_at()).unwrap();
    assert_eq!(a.session_id, log.id());
    assert_eq!(a.started_at, log.started_at());
    assert_eq!(a.session_duration, 0.0);
}

#[test]
fn restart_starts_a_new_session() {
    let mut log = log_of(&[Composed, Tense]);
    let old = log.id();
    let later = log.started_at() + Duration::minutes(5);
    log.restart(later);
    assert!(log.is_empty());
    assert_ne!(log.id(), old);
    assert_eq!(log.started_at(), later);
    assert!(log.analytics(&ReportConfig::default(), later).is_none());
}

#[test]
fn grade_boundaries() {
    let config = ReportConfig::default();
    assert_eq!(Grade::from_score(85.0, &config), Grade::Excellent);
    assert_eq!(Grade::from_score(84.9, &config), Grade::Good);
    assert_eq!(Grade::from_score(70.0, &config), Grade::Good);
    assert_eq!(Grade::from_score(69.9, &config), Grade::Fair);
    assert_eq!(Grade::from_score(55.0, &config), Grade::Fair);
    assert_eq!(Grade::from_score(54.9, &config), Grade::NeedsImprovement);
    assert_eq!(Grade::Excellent.label(), "A - Excellent");
    assert_eq!(Grade::NeedsImprovement.label(), "D - Needs Improvement");
}

#[test]
fn report_pairs_grade_with_summary() {
    let engine = ReportEngine::new(ReportConfig::default());
    let report = engine.report(analytics_of(&[Tense, LowEnergy, Tense]).unwrap());
    assert_eq!(report.grade, Grade::NeedsImprovement);
    assert_eq!(report.summary, Grade::NeedsImprovement.summary());
    assert!(report
        .recommendations
        .contains(&"Practice relaxation techniques before interviews"));
}

#[test]
fn rules_apply_independently() {
    let recs = recommendations(&analytics_with(&[(Tense, 20.0), (Composed, 80.0)], 50.0));
    assert_eq!(
        recs,
        vec![
            "Show more personality - let your passion shine through",
            "Practice smiling naturally when discussing achievements",
            "Practice relaxation techniques before interviews",
            "Reframe challenging questions positively",
            "Work on maintaining consistent emotional energy",
            "Practice emotional regulation techniques",
        ]
    );
}

#[test]
fn rule_thresholds_are_strict() {
    let recs = recommendations(&analytics_with(
        &[(Anxious, 30.0), (LowEnergy, 25.0), (Tense, 15.0), (Confident, 30.0)],
        60.0,
    ));
    assert_eq!(
        recs,
        vec!["Maintain your excellent interview presence!", "Keep practicing to stay sharp"]
    );

    let recs = recommendations(&analytics_with(&[(Anxious, 30.1), (LowEnergy, 25.1)], 90.0));
    assert_eq!(recs.len(), 4);
    assert_eq!(recs[0], "Practice mock interviews to reduce anxiety");
    assert_eq!(recs[2], "Work on projecting enthusiasm and energy");
}

#[test]
fn composed_rule_needs_low_confidence() {
    let recs = recommendations(&analytics_with(&[(Composed, 60.0), (Confident, 25.0)], 90.0));
    assert_eq!(recs[0], "Maintain your excellent interview presence!");

    let recs = recommendations(&analytics_with(&[(Composed, 60.0), (Confident, 10.0)], 90.0));
    assert_eq!(recs[0], "Show more personality - let your passion shine through");
    assert_eq!(recs.len(), 2);
}
