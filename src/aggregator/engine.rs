//! Aggregation of decoded samples into a ranked call graph.
//!
//! Every edge `caller==>callee` is recorded twice, once under the caller
//! (forward) and once under the callee (reverse), so the navigator can look up
//! children and parents of a method directly. Every key also feeds the
//! per-method totals of its callee.

use super::stats::{FinalizedStat, StatAccumulator};
use crate::parser::{parse_key, DecodedSample, Observation, SampleDecoder};
use crate::source::BlobResult;
use crate::utils::config::DEFAULT_PERCENTILE;
use crate::utils::error::AggregateError;
use indexmap::IndexMap;
use log::{debug, info, warn};
use serde::Serialize;
use std::collections::HashMap;

/// Two-level map `method -> other method -> stats`, inner order = discovery order
type EdgeMap = HashMap<String, IndexMap<String, StatAccumulator>>;

/// Running aggregates over a stream of samples
///
/// `finalize` consumes the aggregator, so no sample can be added afterwards.
#[derive(Debug, Default)]
pub struct Aggregator {
    forward: EdgeMap,
    reverse: EdgeMap,
    method_totals: IndexMap<String, StatAccumulator>,
    samples: u64,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of samples accepted so far
    pub fn samples_accumulated(&self) -> u64 {
        self.samples
    }

    /// Fold one decoded sample into the aggregates
    ///
    /// **Public** - main entry point for accumulation
    ///
    /// All metrics are validated before anything is recorded, so a rejected
    /// sample leaves the aggregates untouched.
    ///
    /// # Errors
    /// * `AggregateError::InvalidInput` - a metric has a negative or non-finite value
    pub fn accumulate(&mut self, sample: &DecodedSample) -> Result<(), AggregateError> {
        let observations = sample
            .iter()
            .map(|(key, raw)| {
                Observation::try_from(*raw).map_err(|e| match e {
                    AggregateError::InvalidInput(msg) => {
                        AggregateError::InvalidInput(format!("{}: {}", key, msg))
                    }
                    other => other,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        for (key, obs) in sample.keys().zip(observations) {
            let edge = parse_key(key);

            if let Some(caller) = &edge.caller {
                upsert_edge(&mut self.forward, caller, &edge.callee, obs);
                upsert_edge(&mut self.reverse, &edge.callee, caller, obs);
            }

            upsert(&mut self.method_totals, &edge.callee, obs);
        }

        self.samples += 1;
        Ok(())
    }

    /// Read, decode and accumulate every blob of a source
    ///
    /// **Public** - convenience driver used by the commands
    ///
    /// A blob that cannot be read, decoded or validated is skipped and
    /// counted; the run continues.
    pub fn ingest<I, D>(&mut self, blobs: I, decoder: &D) -> IngestReport
    where
        I: IntoIterator<Item = BlobResult>,
        D: SampleDecoder + ?Sized,
    {
        let mut report = IngestReport::default();

        for blob in blobs {
            report.read += 1;

            let outcome = blob
                .map_err(|e| e.to_string())
                .and_then(|bytes| decoder.decode(&bytes).map_err(|e| e.to_string()))
                .and_then(|sample| self.accumulate(&sample).map_err(|e| e.to_string()));

            match outcome {
                Ok(()) => report.accumulated += 1,
                Err(reason) => {
                    warn!("Skipping sample #{}: {}", report.read, reason);
                    report.skipped += 1;
                }
            }

            if report.read % 1000 == 0 {
                debug!("Read {} samples ({} skipped)", report.read, report.skipped);
            }
        }

        info!(
            "Read {} samples: {} accumulated, {} skipped",
            report.read, report.accumulated, report.skipped
        );

        report
    }

    /// Absorb an aggregator built over another part of the stream
    ///
    /// Keys first seen in `other` are appended after this aggregator's keys.
    pub fn merge(&mut self, other: Aggregator) {
        merge_edges(&mut self.forward, other.forward);
        merge_edges(&mut self.reverse, other.reverse);
        merge_map(&mut self.method_totals, other.method_totals);
        self.samples += other.samples;
    }

    /// Finalize with the default wall-time percentile
    ///
    /// # Errors
    /// * `AggregateError::InvalidInput` - `request_count` is zero
    pub fn finalize(self, request_count: u64) -> Result<CallGraphIndex, AggregateError> {
        self.finalize_with(request_count, DEFAULT_PERCENTILE)
    }

    /// Normalize every aggregate per request and rank the edges
    ///
    /// **Public** - one-shot transition to the read-only call graph
    ///
    /// # Arguments
    /// * `request_count` - population size the averages are taken over
    /// * `percentile` - wall-time percentile to estimate, in (0, 1)
    ///
    /// # Errors
    /// * `AggregateError::InvalidInput` - zero request count or percentile out of range
    pub fn finalize_with(
        self,
        request_count: u64,
        percentile: f64,
    ) -> Result<CallGraphIndex, AggregateError> {
        if request_count == 0 {
            return Err(AggregateError::InvalidInput(
                "request count must be greater than 0".to_string(),
            ));
        }
        if !(percentile > 0.0 && percentile < 1.0) {
            return Err(AggregateError::InvalidInput(format!(
                "percentile must be between 0 and 1 (exclusive), got {}",
                percentile
            )));
        }

        info!(
            "Finalizing {} methods over {} requests",
            self.method_totals.len(),
            request_count
        );

        let method_stats = self
            .method_totals
            .into_iter()
            .map(|(method, acc)| (method, acc.finalize(request_count, percentile)))
            .collect();

        let children = rank_edges(self.forward, request_count, percentile);
        let parents = rank_edges(self.reverse, request_count, percentile);

        Ok(CallGraphIndex {
            request_count,
            percentile,
            method_stats,
            children,
            parents,
        })
    }
}

fn upsert(map: &mut IndexMap<String, StatAccumulator>, key: &str, obs: Observation) {
    match map.get_mut(key) {
        Some(acc) => acc.record(obs),
        None => {
            map.insert(key.to_string(), StatAccumulator::new(obs));
        }
    }
}

fn upsert_edge(map: &mut EdgeMap, outer: &str, inner: &str, obs: Observation) {
    match map.get_mut(outer) {
        Some(edges) => upsert(edges, inner, obs),
        None => {
            let mut edges = IndexMap::new();
            edges.insert(inner.to_string(), StatAccumulator::new(obs));
            map.insert(outer.to_string(), edges);
        }
    }
}

fn merge_map(into: &mut IndexMap<String, StatAccumulator>, from: IndexMap<String, StatAccumulator>) {
    for (key, acc) in from {
        match into.get_mut(&key) {
            Some(existing) => existing.merge(acc),
            None => {
                into.insert(key, acc);
            }
        }
    }
}

fn merge_edges(into: &mut EdgeMap, from: EdgeMap) {
    for (outer, edges) in from {
        merge_map(into.entry(outer).or_default(), edges);
    }
}

/// Finalize every edge and sort each method's edges by average wall time
///
/// The sort is stable: equal costs keep discovery order.
fn rank_edges(
    edges: EdgeMap,
    request_count: u64,
    percentile: f64,
) -> HashMap<String, Vec<RankedEntry>> {
    edges
        .into_iter()
        .map(|(method, accs)| {
            let mut ranked: Vec<RankedEntry> = accs
                .into_iter()
                .map(|(other, acc)| RankedEntry {
                    method: other,
                    stat: acc.finalize(request_count, percentile),
                })
                .collect();
            ranked.sort_by(|a, b| b.stat.avg_wall_time.total_cmp(&a.stat.avg_wall_time));
            (method, ranked)
        })
        .collect()
}

/// Outcome of ingesting a sample source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// Blobs pulled from the source, including skipped ones
    pub read: u64,

    /// Samples folded into the aggregates
    pub accumulated: u64,

    /// Blobs rejected while reading, decoding or validating
    pub skipped: u64,
}

impl IngestReport {
    /// Population to normalize against: every sample read, skipped or not
    pub fn request_count(&self) -> u64 {
        self.read
    }

    /// # Errors
    /// * `AggregateError::EmptyPopulation` - the source yielded nothing
    pub fn ensure_populated(&self) -> Result<(), AggregateError> {
        if self.read == 0 {
            return Err(AggregateError::EmptyPopulation);
        }
        Ok(())
    }
}

/// One ranked row: the other end of an edge and its statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry {
    pub method: String,
    pub stat: FinalizedStat,
}

/// Read-only call graph produced by [`Aggregator::finalize`]
#[derive(Debug, Clone, Serialize)]
pub struct CallGraphIndex {
    request_count: u64,
    percentile: f64,
    method_stats: IndexMap<String, FinalizedStat>,
    children: HashMap<String, Vec<RankedEntry>>,
    parents: HashMap<String, Vec<RankedEntry>>,
}

impl CallGraphIndex {
    pub fn request_count(&self) -> u64 {
        self.request_count
    }

    pub fn percentile(&self) -> f64 {
        self.percentile
    }

    /// Self cost of a method across all of its callers
    pub fn method_stat(&self, method: &str) -> Option<&FinalizedStat> {
        self.method_stats.get(method)
    }

    /// All methods in discovery order
    pub fn methods(&self) -> impl Iterator<Item = (&str, &FinalizedStat)> {
        self.method_stats.iter().map(|(m, s)| (m.as_str(), s))
    }

    /// Calls made by `method`, most expensive first
    pub fn children(&self, method: &str) -> &[RankedEntry] {
        self.children.get(method).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Calls made into `method`, most expensive first
    pub fn parents(&self, method: &str) -> &[RankedEntry] {
        self.parents.get(method).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether `method` calls anything, i.e. can be drilled into
    pub fn has_children(&self, method: &str) -> bool {
        !self.children(method).is_empty()
    }

    pub fn method_count(&self) -> usize {
        self.method_stats.len()
    }

    pub fn edge_count(&self) -> usize {
        self.children.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::RawMetric;

    fn sample(entries: &[(&str, i64, f64)]) -> DecodedSample {
        entries
            .iter()
            .map(|(k, ct, wt)| (k.to_string(), RawMetric::new(*ct, *wt)))
            .collect()
    }

    #[test]
    fn test_root_call_only_updates_method_totals() {
        let mut agg = Aggregator::new();
        agg.accumulate(&sample(&[("main()", 1, 100.0)])).unwrap();

        assert!(agg.forward.is_empty());
        assert!(agg.reverse.is_empty());
        assert_eq!(agg.method_totals["main()"].total_wall_time(), 100.0);
    }

    #[test]
    fn test_edge_recorded_in_both_directions() {
        let mut agg = Aggregator::new();
        agg.accumulate(&sample(&[("a==>b", 2, 10.0)])).unwrap();

        assert_eq!(agg.forward["a"]["b"], agg.reverse["b"]["a"]);
        assert_eq!(agg.method_totals["b"].total_count(), 2);
        assert!(!agg.method_totals.contains_key("a"));
    }

    #[test]
    fn test_invalid_sample_is_rejected_atomically() {
        let mut agg = Aggregator::new();
        let result = agg.accumulate(&sample(&[("a==>b", 1, 10.0), ("b==>c", -1, 5.0)]));

        assert!(matches!(result, Err(AggregateError::InvalidInput(msg)) if msg.contains("b==>c")));
        assert!(agg.forward.is_empty());
        assert!(agg.method_totals.is_empty());
        assert_eq!(agg.samples_accumulated(), 0);
    }

    #[test]
    fn test_finalize_rejects_zero_requests() {
        let mut agg = Aggregator::new();
        agg.accumulate(&sample(&[("main()", 1, 1.0)])).unwrap();
        assert!(matches!(agg.finalize(0), Err(AggregateError::InvalidInput(_))));
    }

    #[test]
    fn test_finalize_rejects_bad_percentile() {
        assert!(Aggregator::new().finalize_with(1, 1.0).is_err());
    }

    #[test]
    fn test_missing_method_has_empty_views() {
        let index = Aggregator::new().finalize(1).unwrap();
        assert!(index.method_stat("nope").is_none());
        assert!(index.children("nope").is_empty());
        assert!(index.parents("nope").is_empty());
        assert!(!index.has_children("nope"));
    }
}
