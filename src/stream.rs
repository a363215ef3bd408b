//! Frame stream: JSON-lines classifier input in, one detection outcome per line out,
//! then the session report.
//!
//! Input is read on its own thread so a stop request is seen even while the source is
//! idle (an open pipe or terminal with nothing to read).

use crate::engine::SessionEngine;
use crate::logging::StructuredLogger;
use crate::model::AffectClassifier;
use serde::de::DeserializeOwned;
use std::io::{self, BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;
use tracing::{info, warn};

/// How long the stream waits for a line before re-checking the stop flag.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub const NO_DATA_MESSAGE: &str = "No session data available";

/// Read `input` line by line on a background thread.
/// The channel closes at end of input; the thread ends once the receiver is dropped.
pub fn spawn_line_reader<R>(input: R) -> Receiver<io::Result<String>>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        for line in input.lines() {
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// Feed every frame on `lines` through `engine` until the input ends or `stop` is set.
/// Blank lines are ignored and malformed frames are skipped. Returns the number of
/// frames processed.
pub fn run_stream<C, W>(
    engine: &SessionEngine,
    classifier: &C,
    lines: &Receiver<io::Result<String>>,
    stop: &AtomicBool,
    out: &mut W,
) -> io::Result<usize>
where
    C: AffectClassifier,
    C::Input: DeserializeOwned,
    W: Write,
{
    let mut frames = 0usize;
    let mut line_no = 0usize;
    loop {
        if stop.load(Ordering::Relaxed) {
            info!(frames, "stop requested");
            break;
        }
        let line = match lines.recv_timeout(POLL_INTERVAL) {
            Ok(line) => line?,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        };
        line_no += 1;
        if line.trim().is_empty() {
            continue;
        }
        let frame: C::Input = match serde_json::from_str(&line) {
            Ok(f) => f,
            Err(e) => {
                warn!(line = line_no, error = %e, "skipping malformed frame");
                continue;
            }
        };
        let outcome = engine.detect(classifier, &frame);
        StructuredLogger::emit_json(&outcome, out)?;
        frames += 1;
    }
    Ok(frames)
}

/// Write the closing `{"report": ...}` line, or a null report when nothing was detected.
pub fn emit_report<W: Write>(engine: &SessionEngine, out: &mut W) -> io::Result<()> {
    match engine.session_report() {
        Some(report) => {
            info!(grade = report.grade.label(), "session complete");
            StructuredLogger::emit_json(&serde_json::json!({ "report": report }), out)?;
        }
        None => {
            info!("session complete with no detections");
            StructuredLogger::emit_json(
                &serde_json::json!({ "report": null, "error": NO_DATA_MESSAGE }),
                out,
            )?;
        }
    }
    out.flush()
}
