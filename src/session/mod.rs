//! Trace recording over a remote debugging connection.

pub mod connection;
pub mod recorder;

pub use connection::{DebugConnection, Notification};
pub use recorder::{SessionPhase, TracingSession};
