//! Output rendering for navigator screens and summaries.
//!
//! This module turns navigator and summary data into:
//! - Terminal tables
//! - JSON summary reports

pub mod json;
pub mod table;

// Re-export main functions
pub use json::{report_to_string, SummaryReport};
pub use table::{format_wall_time, render_screen, render_summary};
