//! Trace event parsing and schema definitions.
//!
//! This module handles:
//! - Coercing raw Chrome trace records into typed events
//! - Classifying events by their frame role
//! - Defining the report schema

pub mod event;
pub mod schema;

// Re-export main types
pub use event::{parse_event, parse_events, EventKind, RawTraceEvent, TraceEvent};
pub use schema::SummaryReport;
