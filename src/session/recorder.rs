//! Tracing session state machine.
//!
//! ```text
//! Idle --begin_recording--> Recording --Tracing.tracingComplete--> Draining
//!   ^                                                                 |
//!   +--------------------------- end_recording -----------------------+
//! ```
//!
//! A collector task owns the event buffer for the lifetime of one
//! recording. It is spawned, and subscribed, before `Tracing.start` is
//! sent, and finishes on `Tracing.tracingComplete` by handing the buffer
//! back through its `JoinHandle`.

use super::connection::{DebugConnection, Notification};
use crate::parser::RawTraceEvent;
use crate::utils::config::{
    TRACE_CATEGORIES, TRACE_TRANSFER_MODE, TRACING_COMPLETE, TRACING_DATA_COLLECTED, TRACING_END,
    TRACING_START,
};
use crate::utils::error::SessionError;
use futures::stream::{BoxStream, StreamExt};
use log::{debug, info, warn};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Observable session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    /// Tracing started, events are streaming in
    Recording,
    /// The collector has stopped, waiting for `end_recording`
    Draining,
}

type Collector = JoinHandle<Result<Vec<RawTraceEvent>, SessionError>>;

enum SessionState {
    Idle,
    Recording { label: String, collector: Collector },
}

/// Records one trace at a time over a shared debug connection
pub struct TracingSession<C: DebugConnection + ?Sized> {
    connection: Arc<C>,
    state: SessionState,
}

impl<C: DebugConnection + ?Sized> TracingSession<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            connection,
            state: SessionState::Idle,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        match &self.state {
            SessionState::Idle => SessionPhase::Idle,
            SessionState::Recording { collector, .. } if collector.is_finished() => {
                SessionPhase::Draining
            }
            SessionState::Recording { .. } => SessionPhase::Recording,
        }
    }

    /// Label of the recording in progress
    pub fn label(&self) -> Option<&str> {
        match &self.state {
            SessionState::Idle => None,
            SessionState::Recording { label, .. } => Some(label),
        }
    }

    /// Start recording a trace
    ///
    /// **Public** - caller-facing entry point
    ///
    /// # Errors
    /// * `SessionError::AlreadyActive` - a recording is already in progress
    /// * `SessionError::Command` - the browser rejected `Tracing.start`
    pub async fn begin_recording(&mut self, label: impl Into<String>) -> Result<(), SessionError> {
        if let SessionState::Recording { label, .. } = &self.state {
            return Err(SessionError::AlreadyActive {
                label: label.clone(),
            });
        }
        let label = label.into();

        // Must subscribe before Tracing.start or the first batches are lost
        let collector = tokio::spawn(collect_trace(self.connection.subscribe()));

        let params = json!({
            "categories": TRACE_CATEGORIES,
            "transferMode": TRACE_TRANSFER_MODE,
        });
        if let Err(e) = self.connection.send_command(TRACING_START, params).await {
            collector.abort();
            return Err(e);
        }

        info!("Tracing started: {}", label);
        self.state = SessionState::Recording { label, collector };

        Ok(())
    }

    /// Stop recording and return every buffered raw event
    ///
    /// **Public** - caller-facing entry point
    ///
    /// Returns the session to `Idle` whether or not the recording
    /// succeeded.
    ///
    /// # Errors
    /// * `SessionError::NotActive` - nothing is being recorded
    /// * `SessionError::MalformedStreamPayload` - a data batch was not a list
    /// * `SessionError::StreamClosed` - the connection went away mid-recording
    pub async fn end_recording(&mut self) -> Result<Vec<RawTraceEvent>, SessionError> {
        let SessionState::Recording { label, collector } =
            std::mem::replace(&mut self.state, SessionState::Idle)
        else {
            return Err(SessionError::NotActive);
        };

        if let Err(e) = self.connection.send_command(TRACING_END, json!({})).await {
            collector.abort();
            return Err(e);
        }

        let events = collector.await??;
        info!("Tracing finished: {} ({} events)", label, events.len());

        Ok(events)
    }
}

impl<C: DebugConnection + ?Sized> Drop for TracingSession<C> {
    fn drop(&mut self) {
        if let SessionState::Recording { label, collector } = &self.state {
            warn!("Tracing session dropped while recording: {}", label);
            collector.abort();
        }
    }
}

/// Buffer `Tracing.dataCollected` batches until `Tracing.tracingComplete`
///
/// **Private** - body of the collector task
async fn collect_trace(
    mut notifications: BoxStream<'static, Notification>,
) -> Result<Vec<RawTraceEvent>, SessionError> {
    let mut buffer = Vec::new();

    while let Some(notification) = notifications.next().await {
        match notification.method.as_str() {
            TRACING_DATA_COLLECTED => {
                let payload = match notification.params {
                    Value::Object(mut params) => params.remove("value"),
                    _ => None,
                };
                match payload {
                    Some(Value::Array(events)) => {
                        debug!("Received {} trace events", events.len());
                        buffer.extend(events);
                    }
                    other => {
                        return Err(SessionError::MalformedStreamPayload {
                            method: TRACING_DATA_COLLECTED,
                            found: describe(other.as_ref()),
                        })
                    }
                }
            }
            TRACING_COMPLETE => {
                debug!("Tracing complete, {} events buffered", buffer.len());
                return Ok(buffer);
            }
            _ => {}
        }
    }

    Err(SessionError::StreamClosed)
}

fn describe(value: Option<&Value>) -> String {
    let kind = match value {
        None | Some(Value::Null) => "nothing",
        Some(Value::Bool(_)) => "a boolean",
        Some(Value::Number(_)) => "a number",
        Some(Value::String(_)) => "a string",
        Some(Value::Array(_)) => "a list",
        Some(Value::Object(_)) => "a mapping",
    };
    kind.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;

    fn data(value: Value) -> Notification {
        Notification::new(TRACING_DATA_COLLECTED, json!({ "value": value }))
    }

    #[tokio::test]
    async fn test_collect_until_complete() {
        let notifications = stream::iter(vec![
            data(json!([{"name": "a"}])),
            Notification::new("Page.loadEventFired", json!({})),
            data(json!([{"name": "b"}, {"name": "c"}])),
            Notification::new(TRACING_COMPLETE, json!({})),
            data(json!([{"name": "late"}])),
        ])
        .boxed();

        let events = collect_trace(notifications).await.unwrap();

        assert_eq!(
            events,
            vec![json!({"name": "a"}), json!({"name": "b"}), json!({"name": "c"})]
        );
    }

    #[tokio::test]
    async fn test_collect_rejects_mapping_payload() {
        let notifications = stream::iter(vec![
            data(json!({"name": "a"})),
            data(json!([{"name": "b"}])),
            Notification::new(TRACING_COMPLETE, json!({})),
        ])
        .boxed();

        match collect_trace(notifications).await {
            Err(SessionError::MalformedStreamPayload { found, .. }) => assert_eq!(found, "a mapping"),
            other => panic!("expected malformed payload, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_collect_fails_when_stream_ends_early() {
        let notifications = stream::iter(vec![data(json!([]))]).boxed();

        assert!(matches!(
            collect_trace(notifications).await,
            Err(SessionError::StreamClosed)
        ));
    }
}
