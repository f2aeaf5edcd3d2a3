use crate::utils::config::DEFAULT_TRACE_DUMP_PATH;
use std::path::PathBuf;

/// Arguments for the summarize command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct SummarizeArgs {
    /// Raw trace file (event array or `{"traceEvents": [...]}`)
    pub trace_file: PathBuf,

    /// Benchmark name written into the report
    pub label: String,

    /// Output path for JSON report (optional)
    pub output_json: Option<PathBuf>,

    /// Where to dump the trace if it cannot be interpreted
    pub dump_path: PathBuf,
}

impl Default for SummarizeArgs {
    fn default() -> Self {
        Self {
            trace_file: PathBuf::from("trace.json"),
            label: "benchmark".to_string(),
            output_json: None,
            dump_path: PathBuf::from(DEFAULT_TRACE_DUMP_PATH),
        }
    }
}
