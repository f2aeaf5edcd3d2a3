//! Output JSON schema for summary reports.
//!
//! Durations are written as integer microseconds.
//! Schema is versioned to allow future evolution.

use serde::{Deserialize, Serialize};

/// Top-level report written to JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Name of the recorded benchmark
    pub label: String,

    /// Mean `WebViewImpl::beginFrame` duration
    pub average_begin_frame_time_us: i64,

    /// Mean `WebViewImpl::updateAllLifecyclePhases` duration
    pub average_update_lifecycle_phases_time_us: i64,

    /// Sum of the two averages above
    pub average_total_ui_frame_time_us: i64,

    /// Timestamp when the report was generated
    pub generated_at: String,
}
