#![allow(dead_code)]

use serde_json::{json, Value};

pub const RENDERER_PID: i64 = 100;
pub const BROWSER_PID: i64 = 1;

pub fn renderer_thread_name(pid: i64) -> Value {
    json!({
        "args": {"name": "CrRendererMain"},
        "cat": "__metadata",
        "name": "thread_name",
        "ph": "M",
        "pid": pid,
        "tid": 1,
        "ts": 0
    })
}

pub fn complete(name: &str, pid: i64, ts: i64, dur: i64) -> Value {
    json!({
        "args": {},
        "cat": "blink",
        "name": name,
        "ph": "X",
        "pid": pid,
        "tid": 1,
        "ts": ts,
        "tts": ts,
        "dur": dur
    })
}

pub fn measured(ph: &str, pid: i64, ts: i64) -> Value {
    json!({
        "args": {},
        "cat": "blink.user_timing",
        "name": "measured_frame",
        "ph": ph,
        "pid": pid,
        "tid": 1,
        "ts": ts
    })
}

/// Events for one frame starting at `ts`
pub fn frame(pid: i64, ts: i64, begin_dur: i64, update_dur: i64, measured_end: bool) -> Vec<Value> {
    let mut events = vec![
        complete("WebViewImpl::beginFrame", pid, ts, begin_dur),
        measured("b", pid, ts + 1),
    ];
    if measured_end {
        events.push(measured("e", pid, ts + 2));
    }
    events.push(complete(
        "WebViewImpl::updateAllLifecyclePhases",
        pid,
        ts + 3,
        update_dur,
    ));
    events
}

/// A renderer trace with `count` measured frames
pub fn trace(count: i64, begin_dur: i64, update_dur: i64) -> Vec<Value> {
    let mut events = vec![renderer_thread_name(RENDERER_PID)];
    for i in 0..count {
        events.extend(frame(RENDERER_PID, 1000 + i * 16_000, begin_dur, update_dur, true));
    }
    events
}
