//! Blink Frame Trace
//!
//! Records browser traces over the DevTools protocol and reduces them to
//! per-frame rendering metrics for UI benchmarks.
//!
//! ## Usage
//!
//! ```ignore
//! let mut session = TracingSession::new(connection);
//! session.begin_recording("scroll").await?;
//! // ... drive the page ...
//! let raw = session.end_recording().await?;
//! match summarize_or_dump(&raw, DEFAULT_TRACE_DUMP_PATH)? {
//!     Some(summary) => println!("{}", summary.summary()),
//!     None => println!("no measurable frames"),
//! }
//! ```

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod session;
pub mod summary;
pub mod utils;

pub use aggregator::TraceSummary;
pub use session::{DebugConnection, Notification, SessionPhase, TracingSession};
pub use summary::{summarize, summarize_or_dump};
