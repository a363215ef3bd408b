//! Report benchmark: analytics + grading over long sessions.

use chrono::Utc;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use interview_analytics::config::ReportConfig;
use interview_analytics::features::MappedReading;
use interview_analytics::report::ReportEngine;
use interview_analytics::session::SessionLog;
use interview_analytics::InterviewCategory;

const CATEGORIES: [InterviewCategory; 6] = [
    InterviewCategory::Confident,
    InterviewCategory::Composed,
    InterviewCategory::Engaged,
    InterviewCategory::Anxious,
    InterviewCategory::LowEnergy,
    InterviewCategory::Tense,
];

fn make_log(n: usize) -> SessionLog {
    let mut log = SessionLog::new();
    let now = Utc::now();
    for i in 0..n {
        log.record(
            MappedReading {
                category: CATEGORIES[(i * 7 / 3) % CATEGORIES.len()],
                confidence: 0.7,
            },
            now,
        );
    }
    log
}

fn bench_report_by_length(c: &mut Criterion) {
    let config = ReportConfig::default();
    let engine = ReportEngine::new(config.clone());

    let mut g = c.benchmark_group("session_report_by_length");
    for n in [60, 600, 3600] {
        let log = make_log(n);
        g.bench_function(format!("frames_{}", n).as_str(), |b| {
            b.iter(|| {
                let analytics = log.analytics(&config, Utc::now());
                black_box(analytics.map(|a| engine.report(a)))
            })
        });
    }
    g.finish();
}

criterion_group!(benches, bench_report_by_length);
criterion_main!(benches);
