//! Blink Frame Trace CLI
//!
//! Summarizes recorded browser traces into per-frame rendering metrics.

use anyhow::Result;
use blink_frame_trace::commands::{execute_summarize, validate_args, SummarizeArgs};
use blink_frame_trace::utils::config::{DEFAULT_TRACE_DUMP_PATH, SAMPLE_WINDOW, SCHEMA_VERSION};
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

/// Blink Frame Trace - frame timing metrics from browser traces
#[derive(Parser, Debug)]
#[command(name = "blink-trace")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Summarize a recorded trace file
    Summarize {
        /// Trace JSON (event array or {"traceEvents": [...]})
        #[arg(short, long)]
        file: PathBuf,

        /// Benchmark name written into the report
        #[arg(short, long, default_value = "benchmark")]
        label: String,

        /// Output path for JSON report (optional)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Where to dump the trace if it cannot be interpreted
        #[arg(long, default_value = DEFAULT_TRACE_DUMP_PATH)]
        dump: PathBuf,
    },

    /// Display report schema information
    Schema,

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Summarize {
            file,
            label,
            output,
            dump,
        } => {
            let args = SummarizeArgs {
                trace_file: file,
                label,
                output_json: output,
                dump_path: dump,
            };

            validate_args(&args)?;

            match execute_summarize(&args)? {
                Some(summary) => {
                    println!("{}", args.label);
                    println!(
                        "  Average beginFrame:               {:>10} us",
                        summary.average_begin_frame_time.num_microseconds().unwrap_or(i64::MAX)
                    );
                    println!(
                        "  Average updateAllLifecyclePhases: {:>10} us",
                        summary.average_update_lifecycle_time.num_microseconds().unwrap_or(i64::MAX)
                    );
                    println!(
                        "  Average total UI frame:           {:>10} us",
                        summary.average_total_ui_frame_time.num_microseconds().unwrap_or(i64::MAX)
                    );
                }
                None => println!("{}: no measurable frames", args.label),
            }
        }

        Commands::Schema => display_schema(),

        Commands::Version => display_version(),
    }

    Ok(())
}

/// Display schema information
///
/// **Private** - internal command implementation
fn display_schema() {
    println!("Blink Frame Trace Report Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();
    println!("  version: string                              - Schema version");
    println!("  label: string                                - Benchmark name");
    println!("  average_begin_frame_time_us: number          - Mean beginFrame duration");
    println!("  average_update_lifecycle_phases_time_us: number - Mean lifecycle update duration");
    println!("  average_total_ui_frame_time_us: number       - Sum of the two");
    println!("  generated_at: string                         - ISO 8601 timestamp");
    println!();
    println!("Averages cover the last {} measured frames.", SAMPLE_WINDOW);
}

/// Display version information
///
/// **Private** - internal command implementation
fn display_version() {
    println!("Blink Frame Trace v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
}
