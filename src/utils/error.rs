//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors raised while interpreting a recorded trace
#[derive(Error, Debug)]
pub enum TraceError {
    #[error("Malformed trace event #{index}: field '{field}' {reason}")]
    MalformedEvent {
        index: usize,
        field: &'static str,
        reason: String,
    },

    #[error("Expected exactly one {thread} thread_name event, found {found}")]
    ProcessIdentity { thread: &'static str, found: usize },

    #[error("Event '{name}' at {timestamp}us has no duration")]
    MissingDuration { name: String, timestamp: i64 },

    #[error("Completed frame is missing its {missing} event")]
    IncompleteFrame { missing: &'static str },

    #[error("Cannot average an empty sample window")]
    EmptyWindow,
}

/// Errors raised by the tracing session state machine
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Tracing session '{label}' is already active")]
    AlreadyActive { label: String },

    #[error("No tracing session is active")]
    NotActive,

    #[error("Malformed {method} payload: expected a list of trace events, got {found}")]
    MalformedStreamPayload { method: &'static str, found: String },

    #[error("Notification stream closed before tracing completed")]
    StreamClosed,

    #[error("Command {method} failed: {message}")]
    Command { method: String, message: String },

    #[error("Trace collector task failed: {0}")]
    Collector(#[from] tokio::task::JoinError),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),

    #[error("Invalid trace file: {0}")]
    InvalidTrace(String),
}
