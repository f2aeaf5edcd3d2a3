//! JSON writers for summary reports and raw trace dumps.

use crate::parser::{RawTraceEvent, SummaryReport};
use crate::utils::error::OutputError;
use log::{debug, info};
use serde::Serialize;
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Write a summary report to a JSON file
///
/// **Public** - main entry point for report output
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_report(report: &SummaryReport, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing report to: {}", output_path.display());
    write_pretty(report, output_path)?;
    info!(
        "Report written successfully ({} bytes)",
        calculate_file_size(output_path)
    );

    Ok(())
}

/// Dump a raw trace for postmortem inspection
///
/// **Public** - called when a trace cannot be interpreted
///
/// Output is pretty-printed so it can be read by hand.
pub fn dump_trace(output_path: impl AsRef<Path>, events: &[RawTraceEvent]) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    write_pretty(events, output_path)?;
    info!(
        "Dumped {} raw trace events to {}",
        events.len(),
        output_path.display()
    );

    Ok(())
}

/// Read raw trace events from a file
///
/// **Public** - used by the summarize command
///
/// Accepts both Chrome trace file layouts: a bare event array, or an
/// object with a `traceEvents` array.
pub fn read_trace(input_path: impl AsRef<Path>) -> Result<Vec<RawTraceEvent>, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading trace from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;
    let value: Value =
        serde_json::from_reader(BufReader::new(file)).map_err(OutputError::SerializationFailed)?;

    let events = match value {
        Value::Array(events) => events,
        Value::Object(mut obj) => match obj.remove("traceEvents") {
            Some(Value::Array(events)) => events,
            _ => {
                return Err(OutputError::InvalidTrace(
                    "object trace file must contain a 'traceEvents' array".to_string(),
                ))
            }
        },
        _ => {
            return Err(OutputError::InvalidTrace(
                "trace file must be a JSON array or object".to_string(),
            ))
        }
    };

    debug!("Loaded {} raw trace events", events.len());

    Ok(events)
}

/// Serialize `value` as pretty JSON, creating parent directories
///
/// **Private** - shared by report and dump writers
fn write_pretty<T: Serialize + ?Sized>(value: &T, output_path: &Path) -> Result<(), OutputError> {
    validate_output_path(output_path)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, value).map_err(OutputError::SerializationFailed)?;
    writer.flush().map_err(OutputError::WriteFailed)?;

    Ok(())
}

/// Validate that output path is writable
///
/// **Private** - internal validation
fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::NamedTempFile;

    fn create_test_report() -> SummaryReport {
        SummaryReport {
            version: "1.0.0".to_string(),
            label: "scroll".to_string(),
            average_begin_frame_time_us: 1000,
            average_update_lifecycle_phases_time_us: 2000,
            average_total_ui_frame_time_us: 3000,
            generated_at: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_write_report() {
        let report = create_test_report();
        let temp_file = NamedTempFile::new().unwrap();

        write_report(&report, temp_file.path()).unwrap();

        let loaded: SummaryReport =
            serde_json::from_reader(File::open(temp_file.path()).unwrap()).unwrap();
        assert_eq!(loaded, report);
    }

    #[test]
    fn test_dump_is_pretty_printed() {
        let temp_file = NamedTempFile::new().unwrap();
        let events = vec![json!({"name": "a", "ts": 1})];

        dump_trace(temp_file.path(), &events).unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert!(content.contains('\n'));
        assert_eq!(read_trace(temp_file.path()).unwrap(), events);
    }

    #[test]
    fn test_read_trace_events_object() {
        let temp_file = NamedTempFile::new().unwrap();
        std::fs::write(
            temp_file.path(),
            r#"{"traceEvents": [{"name": "a"}], "metadata": {}}"#,
        )
        .unwrap();

        let events = read_trace(temp_file.path()).unwrap();
        assert_eq!(events, vec![json!({"name": "a"})]);
    }

    #[test]
    fn test_read_trace_rejects_scalar() {
        let temp_file = NamedTempFile::new().unwrap();
        std::fs::write(temp_file.path(), "42").unwrap();

        assert!(matches!(
            read_trace(temp_file.path()),
            Err(OutputError::InvalidTrace(_))
        ));
    }

    #[test]
    fn test_validate_output_path_empty() {
        assert!(validate_output_path(Path::new("")).is_err());
    }

    #[test]
    fn test_validate_output_path_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(validate_output_path(temp_dir.path()).is_err());
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested_path = temp_dir.path().join("nested/dirs/trace_dump.json");

        dump_trace(&nested_path, &[]).unwrap();

        assert!(nested_path.exists());
    }
}
