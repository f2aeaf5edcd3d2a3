//! Configuration and constants for trace capture and reduction.

/// Current summary report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Number of most recent measurements averaged per metric.
/// Older frames are warm-up noise.
pub const SAMPLE_WINDOW: usize = 10;

/// Where the raw trace is written when interpretation fails
pub const DEFAULT_TRACE_DUMP_PATH: &str = "trace_dump.json";

// Trace-event phase codes
pub const PHASE_COMPLETE: &str = "X";
pub const PHASE_ASYNC_BEGIN: &str = "b";
pub const PHASE_ASYNC_END: &str = "e";

// Event names the frame extractor cares about
pub const BEGIN_FRAME_EVENT: &str = "WebViewImpl::beginFrame";
pub const UPDATE_LIFECYCLE_EVENT: &str = "WebViewImpl::updateAllLifecyclePhases";
pub const MEASURED_FRAME_EVENT: &str = "measured_frame";
pub const THREAD_NAME_EVENT: &str = "thread_name";
pub const RENDERER_MAIN_THREAD: &str = "CrRendererMain";

// DevTools protocol methods
pub const TRACING_START: &str = "Tracing.start";
pub const TRACING_END: &str = "Tracing.end";
pub const TRACING_DATA_COLLECTED: &str = "Tracing.dataCollected";
pub const TRACING_COMPLETE: &str = "Tracing.tracingComplete";

/// Recorded categories:
/// - `blink`: UI thread work (scripting, style, layout, paint)
/// - `blink.user_timing`: `performance.mark`/`measure` marks, incl. `measured_frame`
/// - `gpu`: GPU process work
pub const TRACE_CATEGORIES: &str = "blink,blink.user_timing,gpu";

/// Events are pushed as `Tracing.dataCollected` notifications
pub const TRACE_TRANSFER_MODE: &str = "ReportEvents";
