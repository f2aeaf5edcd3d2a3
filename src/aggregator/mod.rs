//! Aggregation of trace events into frames and metrics.
//!
//! This module transforms parsed trace events into:
//! - Complete frames of the renderer process
//! - Windowed average frame timings

pub mod frames;
pub mod metrics;

// Re-export main types and functions
pub use frames::{extract_frames, find_renderer_process, Frame, FrameExtraction};
pub use metrics::{average_duration, summarize_frames, TraceSummary};
