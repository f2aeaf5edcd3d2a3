//! Output writers for reports and trace dumps.

pub mod json;

// Re-export main functions
pub use json::{dump_trace, read_trace, write_report};
