//! Aggregation of call-graph samples into per-method and per-edge statistics.
//!
//! This module transforms decoded samples into:
//! - Running accumulators per method and per caller→callee edge
//! - A finalized, per-request normalized and ranked call graph
//! - Hot method and call graph summaries

pub mod engine;
pub mod metrics;
pub mod percentile;
pub mod stats;

// Re-export main types and functions
pub use engine::{Aggregator, CallGraphIndex, IngestReport, RankedEntry};
pub use metrics::{summarize, top_methods, HotMethod, IndexSummary};
pub use percentile::estimate_percentile;
pub use stats::{FinalizedStat, StatAccumulator};
