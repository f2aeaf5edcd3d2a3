//! Summarize command implementation.
//!
//! The summarize command:
//! 1. Reads a recorded trace from disk
//! 2. Reduces it to frame metrics (dumping the trace on failure)
//! 3. Writes the optional JSON report

use crate::aggregator::TraceSummary;
use crate::commands::models::SummarizeArgs;
use crate::output::{read_trace, write_report};
use crate::summary::summarize_or_dump;
use anyhow::{Context, Result};
use log::info;
use std::time::Instant;

/// Execute the summarize command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// The summary, or `None` when the trace holds no measured frames
pub fn execute_summarize(args: &SummarizeArgs) -> Result<Option<TraceSummary>> {
    let start_time = Instant::now();

    info!("Summarizing trace: {}", args.trace_file.display());

    let raw_events = read_trace(&args.trace_file).context("Failed to read trace file")?;

    let summary = summarize_or_dump(&raw_events, &args.dump_path).with_context(|| {
        format!(
            "Failed to interpret trace (raw events dumped to {})",
            args.dump_path.display()
        )
    })?;

    match (&summary, &args.output_json) {
        (Some(summary), Some(path)) => {
            write_report(&summary.to_report(&args.label), path)
                .context("Failed to write summary report")?;
        }
        (None, Some(path)) => {
            info!("No measurable frames, not writing {}", path.display());
        }
        _ => {}
    }

    info!(
        "Summarize completed in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );

    Ok(summary)
}

/// Validate summarize arguments
///
/// **Public** - can be called before execute_summarize for early validation
pub fn validate_args(args: &SummarizeArgs) -> Result<()> {
    if args.trace_file.as_os_str().is_empty() {
        anyhow::bail!("Trace file path cannot be empty");
    }

    if !args.trace_file.is_file() {
        anyhow::bail!("Trace file not found: {}", args.trace_file.display());
    }

    if args.label.trim().is_empty() {
        anyhow::bail!("Label cannot be empty");
    }

    if args.dump_path.as_os_str().is_empty() {
        anyhow::bail!("Dump path cannot be empty");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_validate_args_missing_file() {
        let args = SummarizeArgs {
            trace_file: "/nonexistent/trace.json".into(),
            ..Default::default()
        };

        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_empty_label() {
        let trace = NamedTempFile::new().unwrap();
        let args = SummarizeArgs {
            trace_file: trace.path().to_path_buf(),
            label: "  ".to_string(),
            ..Default::default()
        };

        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_valid() {
        let trace = NamedTempFile::new().unwrap();
        let args = SummarizeArgs {
            trace_file: trace.path().to_path_buf(),
            ..Default::default()
        };

        assert!(validate_args(&args).is_ok());
    }
}
