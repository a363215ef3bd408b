//! Interview analytics driver: streams classifier frames (JSON lines) through the session
//! engine, prints one detection outcome per line, then the session report.
//! Input comes from the file named by the first argument, or stdin. Ctrl+C stops early
//! and still prints the report.

use interview_analytics::{
    config::{AnalyticsConfig, ClassifierBackend},
    engine::SessionEngine,
    logging::StructuredLogger,
    model::{OnnxClassifier, ReplayClassifier},
    stream::{emit_report, run_stream, spawn_line_reader},
};
use std::error::Error;
use std::io::{BufRead, BufReader};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, warn};

type BoxError = Box<dyn Error + Send + Sync>;

static STOP: AtomicBool = AtomicBool::new(false);

fn main() -> Result<(), BoxError> {
    let config_path = AnalyticsConfig::resolve_path();
    let config = AnalyticsConfig::load(&config_path);

    StructuredLogger::init(config.log.json, &config.log.level);
    info!(config = %config_path.display(), backend = ?config.classifier.backend, "interview analytics starting");

    if let Err(e) = ctrlc::set_handler(|| STOP.store(true, Ordering::Relaxed)) {
        warn!(error = %e, "could not install Ctrl+C handler");
    }

    let engine = SessionEngine::new(config.clone());
    let input: Box<dyn BufRead + Send> = match std::env::args().nth(1) {
        Some(path) => Box::new(BufReader::new(std::fs::File::open(&path)?)),
        None => Box::new(BufReader::new(std::io::stdin())),
    };
    let lines = spawn_line_reader(input);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let frames = match config.classifier.backend {
        ClassifierBackend::Replay => {
            run_stream(&engine, &ReplayClassifier::new(), &lines, &STOP, &mut out)?
        }
        ClassifierBackend::Onnx => {
            let classifier =
                OnnxClassifier::load(&config.classifier.model_path, config.classifier.input_size)?;
            run_stream(&engine, &classifier, &lines, &STOP, &mut out)?
        }
    };

    info!(frames, "input finished");
    emit_report(&engine, &mut out)?;
    Ok(())
}
