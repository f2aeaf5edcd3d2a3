//! Typed trace events and their classification.
//!
//! Raw records arrive in the Chrome trace-event JSON shape:
//!
//! ```text
//! {"args": {...}, "cat": "blink", "name": "WebViewImpl::beginFrame",
//!  "ph": "X", "pid": 7, "tid": 1, "ts": 1000, "tts": 990, "dur": 120}
//! ```
//!
//! The wire format does not separate integers from floats, so every
//! numeric field is truncated to an integer on the way in.

use crate::utils::config::{
    BEGIN_FRAME_EVENT, MEASURED_FRAME_EVENT, PHASE_ASYNC_BEGIN, PHASE_ASYNC_END, PHASE_COMPLETE,
    RENDERER_MAIN_THREAD, THREAD_NAME_EVENT, UPDATE_LIFECYCLE_EVENT,
};
use crate::utils::error::TraceError;
use log::debug;
use serde_json::{Map, Value};

/// Raw record as received from the debug connection
pub type RawTraceEvent = Value;

/// A single parsed trace event
#[derive(Debug, Clone, PartialEq)]
pub struct TraceEvent {
    /// Free-form event arguments
    pub args: Map<String, Value>,

    /// Comma separated trace categories
    pub category: String,

    pub name: String,

    /// Single character phase code ("X", "b", "e", "M", ...)
    pub phase: String,

    pub process_id: i64,

    pub thread_id: i64,

    /// Tracer clock, microseconds
    pub timestamp: i64,

    /// Thread clock, microseconds
    pub thread_timestamp: Option<i64>,

    /// Only present on complete ("X") events
    pub duration: Option<i64>,
}

/// Frame-relevant role of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    BeginFrame,
    UpdateLifecycle,
    BeginMeasuredFrame,
    EndMeasuredFrame,
    Other,
}

impl TraceEvent {
    /// `WebViewImpl::beginFrame` complete event
    pub fn is_begin_frame(&self) -> bool {
        self.phase == PHASE_COMPLETE && self.name == BEGIN_FRAME_EVENT
    }

    /// `WebViewImpl::updateAllLifecyclePhases` complete event
    pub fn is_update_lifecycle(&self) -> bool {
        self.phase == PHASE_COMPLETE && self.name == UPDATE_LIFECYCLE_EVENT
    }

    /// Metadata event naming the renderer main thread.
    ///
    /// Its `pid` identifies the process whose frames are measured.
    pub fn is_process_identity(&self) -> bool {
        self.name == THREAD_NAME_EVENT
            && self.args.get("name").and_then(Value::as_str) == Some(RENDERER_MAIN_THREAD)
    }

    /// Async begin of a `measured_frame` user timing mark
    pub fn is_begin_measured_frame(&self) -> bool {
        self.phase == PHASE_ASYNC_BEGIN && self.name == MEASURED_FRAME_EVENT
    }

    /// Async end of a `measured_frame` user timing mark
    pub fn is_end_measured_frame(&self) -> bool {
        self.phase == PHASE_ASYNC_END && self.name == MEASURED_FRAME_EVENT
    }

    /// Collapse the frame predicates into a single tag
    pub fn kind(&self) -> EventKind {
        if self.is_begin_frame() {
            EventKind::BeginFrame
        } else if self.is_update_lifecycle() {
            EventKind::UpdateLifecycle
        } else if self.is_begin_measured_frame() {
            EventKind::BeginMeasuredFrame
        } else if self.is_end_measured_frame() {
            EventKind::EndMeasuredFrame
        } else {
            EventKind::Other
        }
    }

    /// Convert back to the wire shape. Absent optional fields are omitted.
    pub fn to_json(&self) -> Value {
        let mut obj = Map::new();
        obj.insert("args".to_string(), Value::Object(self.args.clone()));
        obj.insert("cat".to_string(), Value::from(self.category.clone()));
        obj.insert("name".to_string(), Value::from(self.name.clone()));
        obj.insert("ph".to_string(), Value::from(self.phase.clone()));
        obj.insert("pid".to_string(), Value::from(self.process_id));
        obj.insert("tid".to_string(), Value::from(self.thread_id));
        obj.insert("ts".to_string(), Value::from(self.timestamp));
        if let Some(tts) = self.thread_timestamp {
            obj.insert("tts".to_string(), Value::from(tts));
        }
        if let Some(dur) = self.duration {
            obj.insert("dur".to_string(), Value::from(dur));
        }
        Value::Object(obj)
    }
}

/// Parse one raw record into a typed event
///
/// **Public** - used by the summary pipeline and tests
///
/// # Errors
/// * `TraceError::MalformedEvent` - record is not an object, a required
///   field is missing, or a present field has the wrong type
pub fn parse_event(raw: &RawTraceEvent) -> Result<TraceEvent, TraceError> {
    let obj = raw
        .as_object()
        .ok_or_else(|| malformed("record", format!("must be an object, found {}", raw)))?;

    let args = match obj.get("args") {
        None | Some(Value::Null) => Map::new(),
        Some(Value::Object(map)) => map.clone(),
        Some(other) => return Err(malformed("args", format!("must be an object, found {}", other))),
    };

    Ok(TraceEvent {
        args,
        category: string_field(obj, "cat")?,
        name: string_field(obj, "name")?,
        phase: string_field(obj, "ph")?,
        process_id: required_int(obj, "pid")?,
        thread_id: required_int(obj, "tid")?,
        timestamp: required_int(obj, "ts")?,
        thread_timestamp: optional_int(obj, "tts")?,
        duration: optional_int(obj, "dur")?,
    })
}

/// Parse a full raw event list.
///
/// Stops at the first malformed record; skipping it could hide a change in
/// the trace format.
pub fn parse_events(raw_events: &[RawTraceEvent]) -> Result<Vec<TraceEvent>, TraceError> {
    debug!("Parsing {} raw trace events", raw_events.len());

    raw_events
        .iter()
        .enumerate()
        .map(|(index, raw)| parse_event(raw).map_err(|e| at_index(e, index)))
        .collect()
}

fn at_index(err: TraceError, index: usize) -> TraceError {
    match err {
        TraceError::MalformedEvent { field, reason, .. } => TraceError::MalformedEvent {
            index,
            field,
            reason,
        },
        other => other,
    }
}

fn malformed(field: &'static str, reason: String) -> TraceError {
    TraceError::MalformedEvent {
        index: 0,
        field,
        reason,
    }
}

fn string_field(obj: &Map<String, Value>, field: &'static str) -> Result<String, TraceError> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(malformed(field, format!("must be a string, found {}", other))),
    }
}

fn required_int(obj: &Map<String, Value>, field: &'static str) -> Result<i64, TraceError> {
    optional_int(obj, field)?.ok_or_else(|| malformed(field, "is missing".to_string()))
}

fn optional_int(obj: &Map<String, Value>, field: &'static str) -> Result<Option<i64>, TraceError> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => coerce_int(value)
            .map(Some)
            .ok_or_else(|| malformed(field, format!("is not an integer: {}", value))),
    }
}

/// Truncate a JSON number to `i64`. `None` for non-numbers and out-of-range values.
fn coerce_int(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    let f = value.as_f64()?;
    let truncated = f.trunc();
    // i64::MAX is not representable as f64, so compare against 2^63
    if truncated.is_finite() && truncated >= -(2f64.powi(63)) && truncated < 2f64.powi(63) {
        Some(truncated as i64)
    } else {
        None
    }
}
