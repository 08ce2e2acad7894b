//! Summary metrics over a finalized call graph.
//!
//! Hot methods are the ones with the highest per-request wall time.
//! These are the first places to look when a request is slow.

use super::engine::CallGraphIndex;
use super::stats::FinalizedStat;
use crate::utils::config::ROOT_METHOD;
use log::debug;
use serde::Serialize;

/// A method ranked by per-request wall time
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HotMethod {
    pub method: String,

    /// Share of the root method's wall time, when the root was sampled
    pub percentage: Option<f64>,

    pub stat: FinalizedStat,
}

/// Return the `top_n` most expensive methods
///
/// **Public** - main entry point for the summary command
///
/// Sorted by average wall time, descending; ties keep discovery order.
/// The root method itself is included.
pub fn top_methods(index: &CallGraphIndex, top_n: usize) -> Vec<HotMethod> {
    debug!("Ranking top {} of {} methods", top_n, index.method_count());

    let root_wall_time = index
        .method_stat(ROOT_METHOD)
        .map(|s| s.avg_wall_time)
        .filter(|wt| *wt > 0.0);

    let mut methods: Vec<(&str, &FinalizedStat)> = index.methods().collect();
    methods.sort_by(|a, b| b.1.avg_wall_time.total_cmp(&a.1.avg_wall_time));

    methods
        .into_iter()
        .take(top_n)
        .map(|(method, stat)| create_hot_method(method, stat, root_wall_time))
        .collect()
}

/// **Private** - internal conversion
fn create_hot_method(method: &str, stat: &FinalizedStat, root_wall_time: Option<f64>) -> HotMethod {
    HotMethod {
        method: method.to_string(),
        percentage: root_wall_time.map(|root| stat.avg_wall_time / root * 100.0),
        stat: stat.clone(),
    }
}

/// Size and cost overview of a call graph
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexSummary {
    /// Requests the averages are normalized over
    pub request_count: u64,

    /// Distinct methods seen as a callee or root
    pub method_count: usize,

    /// Distinct caller→callee edges
    pub edge_count: usize,

    /// Per-request wall time of the root method, if it was sampled
    pub root_avg_wall_time: Option<f64>,

    /// Root wall-time percentile, if enough samples were seen
    pub root_percentile_wall_time: Option<f64>,
}

/// Summarize a call graph
pub fn summarize(index: &CallGraphIndex) -> IndexSummary {
    let root = index.method_stat(ROOT_METHOD);

    IndexSummary {
        request_count: index.request_count(),
        method_count: index.method_count(),
        edge_count: index.edge_count(),
        root_avg_wall_time: root.map(|s| s.avg_wall_time),
        root_percentile_wall_time: root.and_then(|s| s.percentile_wall_time),
    }
}

impl IndexSummary {
    /// Get human-readable summary
    ///
    /// **Public** - for logging and debugging
    pub fn summary(&self) -> String {
        format!(
            "Requests: {} | Methods: {} | Edges: {} | Root wall time: {}",
            self.request_count,
            self.method_count,
            self.edge_count,
            self.root_avg_wall_time
                .map(|wt| format!("{:.0}", wt))
                .unwrap_or_else(|| "-".to_string())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::Aggregator;
    use crate::parser::{DecodedSample, RawMetric};

    fn build_index() -> CallGraphIndex {
        let sample: DecodedSample = [
            ("main()", 1, 1000.0),
            ("main()==>render", 1, 600.0),
            ("main()==>load", 1, 300.0),
            ("load==>query", 4, 250.0),
        ]
        .iter()
        .map(|(k, ct, wt)| (k.to_string(), RawMetric::new(*ct, *wt)))
        .collect();

        let mut agg = Aggregator::new();
        agg.accumulate(&sample).unwrap();
        agg.accumulate(&sample).unwrap();
        agg.finalize(2).unwrap()
    }

    #[test]
    fn test_top_methods() {
        let index = build_index();
        let top = top_methods(&index, 3);

        assert_eq!(top.len(), 3);
        assert_eq!(top[0].method, "main()");
        assert_eq!(top[0].percentage, Some(100.0));
        assert_eq!(top[1].method, "render");
        assert_eq!(top[1].percentage, Some(60.0));
        assert_eq!(top[2].method, "load");
    }

    #[test]
    fn test_summarize() {
        let summary = summarize(&build_index());

        assert_eq!(summary.request_count, 2);
        assert_eq!(summary.method_count, 4);
        assert_eq!(summary.edge_count, 3);
        assert_eq!(summary.root_avg_wall_time, Some(1000.0));
        assert_eq!(summary.root_percentile_wall_time, None);
        assert!(summary.summary().contains("Edges: 3"));
    }

    #[test]
    fn test_top_methods_without_root() {
        let sample: DecodedSample = [("a==>b".to_string(), RawMetric::new(1, 5.0))]
            .into_iter()
            .collect();
        let mut agg = Aggregator::new();
        agg.accumulate(&sample).unwrap();
        let index = agg.finalize(1).unwrap();

        let top = top_methods(&index, 10);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].percentage, None);
    }
}
