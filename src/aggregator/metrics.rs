//! Reduce extracted frames to average frame timings.
//!
//! Only the last `SAMPLE_WINDOW` frames are averaged so that warm-up
//! frames at the start of a benchmark do not skew the result.

use super::frames::Frame;
use crate::parser::{SummaryReport, TraceEvent};
use crate::utils::config::{BEGIN_FRAME_EVENT, SAMPLE_WINDOW, SCHEMA_VERSION};
use crate::utils::error::TraceError;
use chrono::Duration;
use log::debug;

/// Average frame timings over the sample window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceSummary {
    /// Time spent in `WebViewImpl::beginFrame`
    pub average_begin_frame_time: Duration,

    /// Time spent in `WebViewImpl::updateAllLifecyclePhases`
    pub average_update_lifecycle_time: Duration,

    /// Sum of the two, the UI-thread cost of a frame
    pub average_total_ui_frame_time: Duration,
}

impl TraceSummary {
    /// Convert to the serializable report
    ///
    /// **Public** - used by commands to write output files
    pub fn to_report(&self, label: &str) -> SummaryReport {
        use chrono::Utc;

        SummaryReport {
            version: SCHEMA_VERSION.to_string(),
            label: label.to_string(),
            average_begin_frame_time_us: self
                .average_begin_frame_time
                .num_microseconds()
                .unwrap_or(i64::MAX),
            average_update_lifecycle_phases_time_us: self
                .average_update_lifecycle_time
                .num_microseconds()
                .unwrap_or(i64::MAX),
            average_total_ui_frame_time_us: self
                .average_total_ui_frame_time
                .num_microseconds()
                .unwrap_or(i64::MAX),
            generated_at: Utc::now().to_rfc3339(),
        }
    }

    /// Get human-readable summary
    ///
    /// **Public** - for logging and CLI output
    pub fn summary(&self) -> String {
        format!(
            "beginFrame: {:.3}ms | updateAllLifecyclePhases: {:.3}ms | total UI frame: {:.3}ms",
            as_millis(self.average_begin_frame_time),
            as_millis(self.average_update_lifecycle_time),
            as_millis(self.average_total_ui_frame_time)
        )
    }
}

fn as_millis(duration: Duration) -> f64 {
    duration.num_microseconds().unwrap_or(i64::MAX) as f64 / 1000.0
}

/// Average duration of the most recent `SAMPLE_WINDOW` events
///
/// **Public** - building block for summarize_frames
///
/// # Arguments
/// * `events` - Duration-bearing events in sequence order
///
/// # Returns
/// Mean duration, truncated to whole microseconds
///
/// # Errors
/// * `TraceError::MissingDuration` - an event in the window has no `dur`
/// * `TraceError::EmptyWindow` - no events at all
pub fn average_duration(events: &[&TraceEvent]) -> Result<Duration, TraceError> {
    let window = &events[events.len().saturating_sub(SAMPLE_WINDOW)..];
    if window.is_empty() {
        return Err(TraceError::EmptyWindow);
    }

    let total = window.iter().try_fold(0i64, |sum, event| {
        let duration = event.duration.ok_or_else(|| TraceError::MissingDuration {
            name: event.name.clone(),
            timestamp: event.timestamp,
        })?;
        Ok(sum.saturating_add(duration))
    })?;

    Ok(Duration::microseconds(total / window.len() as i64))
}

/// Summarize complete frames
///
/// **Public** - main entry point for metric reduction
///
/// # Returns
/// `None` when there are no frames to measure. That is a valid outcome,
/// not an error.
pub fn summarize_frames(frames: &[Frame]) -> Result<Option<TraceSummary>, TraceError> {
    if frames.is_empty() {
        debug!("No complete frames to summarize");
        return Ok(None);
    }

    let begin_frames = frames
        .iter()
        .map(|frame| {
            frame.begin_frame.as_ref().ok_or(TraceError::IncompleteFrame {
                missing: BEGIN_FRAME_EVENT,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    // Complete frames are always closed by a lifecycle update
    let lifecycle_updates: Vec<&TraceEvent> = frames
        .iter()
        .filter_map(|frame| frame.update_lifecycle.as_ref())
        .collect();

    let average_begin_frame_time = average_duration(&begin_frames)?;
    let average_update_lifecycle_time = average_duration(&lifecycle_updates)?;

    Ok(Some(TraceSummary {
        average_begin_frame_time,
        average_update_lifecycle_time,
        average_total_ui_frame_time: average_begin_frame_time + average_update_lifecycle_time,
    }))
}
