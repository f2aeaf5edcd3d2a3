//! Reconstruct animation frames from a renderer trace.
//!
//! A frame is the run of events between two `updateAllLifecyclePhases`
//! events on the renderer process:
//!
//! ```text
//! beginFrame .. measured_frame(b) .. measured_frame(e) .. updateAllLifecyclePhases
//! ```
//!
//! The lifecycle update closes the frame. Frames without a matching
//! `measured_frame` end were not part of the benchmark and are skipped.

use crate::parser::{EventKind, TraceEvent};
use crate::utils::config::RENDERER_MAIN_THREAD;
use crate::utils::error::TraceError;
use log::debug;

/// Events that make up one frame, in arrival order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub begin_frame: Option<TraceEvent>,
    pub update_lifecycle: Option<TraceEvent>,
    pub begin_measured_frame: Option<TraceEvent>,
    pub end_measured_frame: Option<TraceEvent>,
}

impl Frame {
    /// A frame counts only if the benchmark marked its end
    pub fn is_complete(&self) -> bool {
        self.end_measured_frame.is_some()
    }
}

/// Result of a single extraction pass
#[derive(Debug, Clone, Default)]
pub struct FrameExtraction {
    /// Complete frames in timestamp order
    pub frames: Vec<Frame>,

    /// Frames closed without a `measured_frame` end
    pub skipped: usize,
}

/// Find the renderer process id
///
/// **Public** - used by extract_frames and diagnostics
///
/// # Errors
/// * `TraceError::ProcessIdentity` - zero or several renderer main threads
pub fn find_renderer_process(events: &[TraceEvent]) -> Result<i64, TraceError> {
    let identities: Vec<&TraceEvent> = events.iter().filter(|e| e.is_process_identity()).collect();

    match identities.as_slice() {
        [only] => Ok(only.process_id),
        _ => Err(TraceError::ProcessIdentity {
            thread: RENDERER_MAIN_THREAD,
            found: identities.len(),
        }),
    }
}

/// Extract complete frames from an unfiltered event list
///
/// **Public** - main entry point for frame reconstruction
///
/// # Arguments
/// * `events` - Parsed events from every traced process, any order
///
/// # Returns
/// Complete frames of the renderer process plus the skipped-frame count
pub fn extract_frames(events: &[TraceEvent]) -> Result<FrameExtraction, TraceError> {
    let renderer_pid = find_renderer_process(events)?;

    let mut renderer_events: Vec<&TraceEvent> =
        events.iter().filter(|e| e.process_id == renderer_pid).collect();

    // Stable: equal timestamps keep arrival order
    renderer_events.sort_by_key(|e| e.timestamp);

    debug!(
        "Extracting frames from {} of {} events (renderer pid {})",
        renderer_events.len(),
        events.len(),
        renderer_pid
    );

    Ok(pair_frames(renderer_events))
}

/// Single pass over pre-filtered, pre-sorted events
///
/// **Private** - internal pairing logic
fn pair_frames<'a>(events: impl IntoIterator<Item = &'a TraceEvent>) -> FrameExtraction {
    let mut extraction = FrameExtraction::default();
    let mut current = Frame::default();

    for event in events {
        match event.kind() {
            EventKind::BeginFrame => current.begin_frame = Some(event.clone()),
            EventKind::BeginMeasuredFrame => current.begin_measured_frame = Some(event.clone()),
            EventKind::EndMeasuredFrame => current.end_measured_frame = Some(event.clone()),
            EventKind::UpdateLifecycle => {
                current.update_lifecycle = Some(event.clone());
                let closed = std::mem::take(&mut current);
                if closed.is_complete() {
                    extraction.frames.push(closed);
                } else {
                    extraction.skipped += 1;
                }
            }
            EventKind::Other => {}
        }
    }

    debug!(
        "Kept {} frames, skipped {}",
        extraction.frames.len(),
        extraction.skipped
    );

    extraction
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_event;
    use serde_json::json;

    fn event(name: &str, ph: &str, pid: i64, ts: i64) -> TraceEvent {
        parse_event(&json!({"name": name, "ph": ph, "pid": pid, "tid": 1, "ts": ts, "dur": 1}))
            .unwrap()
    }

    fn identity(pid: i64) -> TraceEvent {
        parse_event(&json!({
            "name": "thread_name", "ph": "M", "pid": pid, "tid": 1, "ts": 0,
            "args": {"name": "CrRendererMain"}
        }))
        .unwrap()
    }

    #[test]
    fn test_find_renderer_process() {
        let events = vec![identity(5), event("x", "X", 3, 1)];
        assert_eq!(find_renderer_process(&events).unwrap(), 5);
    }

    #[test]
    fn test_missing_renderer_is_error() {
        let events = vec![event("x", "X", 3, 1)];
        assert!(matches!(
            find_renderer_process(&events),
            Err(TraceError::ProcessIdentity { found: 0, .. })
        ));
    }

    #[test]
    fn test_pair_keeps_complete_frame() {
        let events = vec![
            event("WebViewImpl::beginFrame", "X", 1, 10),
            event("measured_frame", "b", 1, 11),
            event("measured_frame", "e", 1, 12),
            event("WebViewImpl::updateAllLifecyclePhases", "X", 1, 13),
        ];

        let extraction = pair_frames(&events);

        assert_eq!(extraction.frames.len(), 1);
        assert_eq!(extraction.skipped, 0);
        let frame = &extraction.frames[0];
        assert_eq!(frame.begin_frame.as_ref().map(|e| e.timestamp), Some(10));
        assert_eq!(frame.update_lifecycle.as_ref().map(|e| e.timestamp), Some(13));
    }

    #[test]
    fn test_pair_skips_unmeasured_frame() {
        let events = vec![
            event("WebViewImpl::beginFrame", "X", 1, 10),
            event("WebViewImpl::updateAllLifecyclePhases", "X", 1, 13),
        ];

        let extraction = pair_frames(&events);

        assert!(extraction.frames.is_empty());
        assert_eq!(extraction.skipped, 1);
    }

    #[test]
    fn test_repeated_begin_frame_last_write_wins() {
        let events = vec![
            event("WebViewImpl::beginFrame", "X", 1, 10),
            event("WebViewImpl::beginFrame", "X", 1, 20),
            event("measured_frame", "e", 1, 21),
            event("WebViewImpl::updateAllLifecyclePhases", "X", 1, 22),
        ];

        let extraction = pair_frames(&events);

        assert_eq!(
            extraction.frames[0].begin_frame.as_ref().map(|e| e.timestamp),
            Some(20)
        );
    }

    #[test]
    fn test_unclosed_trailing_frame_is_dropped() {
        let events = vec![
            event("WebViewImpl::beginFrame", "X", 1, 10),
            event("measured_frame", "e", 1, 12),
        ];

        let extraction = pair_frames(&events);

        assert!(extraction.frames.is_empty());
        assert_eq!(extraction.skipped, 0);
    }

    #[test]
    fn test_extract_sorts_and_filters() {
        // Delivered out of order, with browser-process noise
        let events = vec![
            event("WebViewImpl::updateAllLifecyclePhases", "X", 1, 30),
            identity(1),
            event("measured_frame", "e", 2, 25),
            event("measured_frame", "e", 1, 20),
            event("WebViewImpl::beginFrame", "X", 1, 10),
        ];

        let extraction = extract_frames(&events).unwrap();

        assert_eq!(extraction.frames.len(), 1);
        assert_eq!(
            extraction.frames[0].end_measured_frame.as_ref().map(|e| e.process_id),
            Some(1)
        );
    }
}
