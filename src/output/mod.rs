//! Output module for writing harvest results
//!
//! This module handles:
//! - Writing the CSV report of successful storefronts
//! - Summarizing a finished batch

mod report;
pub mod stats;

pub use report::{report_columns, write_report, write_report_to_path, ReportSummary};
pub use stats::{print_statistics, BatchStatistics};
