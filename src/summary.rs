//! Raw trace to summary pipeline.
//!
//! parse -> keep renderer events -> pair into frames -> average last frames

use crate::aggregator::{extract_frames, summarize_frames, TraceSummary};
use crate::output::dump_trace;
use crate::parser::{parse_events, RawTraceEvent};
use crate::utils::error::TraceError;
use log::{info, warn};
use std::path::Path;

/// Summarize a recorded trace
///
/// **Public** - main entry point for trace interpretation
///
/// # Returns
/// `Ok(None)` if the trace contains no measured frames
pub fn summarize(raw_events: &[RawTraceEvent]) -> Result<Option<TraceSummary>, TraceError> {
    let events = parse_events(raw_events)?;
    let extraction = extract_frames(&events)?;

    if extraction.skipped > 0 {
        info!(
            "Skipped {} frames without a measured_frame end",
            extraction.skipped
        );
    }

    summarize_frames(&extraction.frames)
}

/// Like [`summarize`], but dumps `raw_events` to `dump_path` on failure.
///
/// The original error is returned unchanged. A failed dump is only logged.
pub fn summarize_or_dump(
    raw_events: &[RawTraceEvent],
    dump_path: impl AsRef<Path>,
) -> Result<Option<TraceSummary>, TraceError> {
    summarize(raw_events).inspect_err(|err| {
        let dump_path = dump_path.as_ref();
        warn!("Failed to interpret trace: {}", err);
        if let Err(dump_err) = dump_trace(dump_path, raw_events) {
            warn!(
                "Could not dump trace to {}: {}",
                dump_path.display(),
                dump_err
            );
        }
    })
}
