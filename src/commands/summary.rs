//! Summary command implementation.
//!
//! The summary command:
//! 1. Reads and aggregates samples
//! 2. Ranks methods by per-request wall time
//! 3. Prints a table or a JSON report

use super::models::SummaryArgs;
use super::utils::build_index;
use crate::aggregator::{summarize, top_methods};
use crate::output::{render_summary, report_to_string, SummaryReport};
use anyhow::{Context, Result};
use log::info;
use std::io::Write;

/// Execute the summary command, writing to `out`
pub fn execute_summary(args: &SummaryArgs, out: &mut impl Write) -> Result<()> {
    let settings = args.input.resolve(args.top)?;
    let (index, _report) = build_index(&settings)?;

    let summary = summarize(&index);
    info!("Call graph: {}", summary.summary());

    let methods = top_methods(&index, settings.top);

    if args.json {
        let report = SummaryReport::new(&summary, &methods, index.percentile());
        let json = report_to_string(&report).context("Failed to serialize summary")?;
        writeln!(out, "{}", json)?;
    } else {
        write!(out, "{}", render_summary(&summary, &methods))?;
    }

    Ok(())
}
