//! JSON rendering of the call graph summary.

use crate::aggregator::{HotMethod, IndexSummary};
use log::debug;
use serde::Serialize;

/// Top-level JSON document printed by `summary --json`
#[derive(Debug, Clone, Serialize)]
pub struct SummaryReport<'a> {
    /// Timestamp when the report was generated
    pub generated_at: String,

    /// Percentile reported in `percentile_wall_time`
    pub percentile: f64,

    pub summary: &'a IndexSummary,

    /// Methods ranked by per-request wall time
    pub top_methods: &'a [HotMethod],
}

impl<'a> SummaryReport<'a> {
    pub fn new(summary: &'a IndexSummary, top_methods: &'a [HotMethod], percentile: f64) -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            percentile,
            summary,
            top_methods,
        }
    }
}

/// Serialize a summary report with pretty printing
pub fn report_to_string(report: &SummaryReport<'_>) -> Result<String, serde_json::Error> {
    debug!("Serializing summary of {} methods", report.top_methods.len());
    serde_json::to_string_pretty(report)
}
