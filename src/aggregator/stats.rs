//! Running and finalized statistics for a method or a call edge.

use super::percentile::estimate_percentile;
use crate::parser::Observation;
use serde::Serialize;

/// Mutable aggregate over every observation of one key
///
/// Always built from a first observation, so min/max are never sentinels.
#[derive(Debug, Clone, PartialEq)]
pub struct StatAccumulator {
    observations: u64,
    total_count: u64,
    min_count: u64,
    max_count: u64,
    total_wall_time: f64,
    min_wall_time: f64,
    max_wall_time: f64,
    wall_time_samples: Vec<f64>,
}

impl StatAccumulator {
    /// Start an accumulator from its first observation
    pub fn new(first: Observation) -> Self {
        Self {
            observations: 1,
            total_count: first.count,
            min_count: first.count,
            max_count: first.count,
            total_wall_time: first.wall_time,
            min_wall_time: first.wall_time,
            max_wall_time: first.wall_time,
            wall_time_samples: vec![first.wall_time],
        }
    }

    /// Fold one more observation in
    pub fn record(&mut self, obs: Observation) {
        self.observations += 1;
        self.total_count += obs.count;
        self.min_count = self.min_count.min(obs.count);
        self.max_count = self.max_count.max(obs.count);
        self.total_wall_time += obs.wall_time;
        self.min_wall_time = self.min_wall_time.min(obs.wall_time);
        self.max_wall_time = self.max_wall_time.max(obs.wall_time);
        self.wall_time_samples.push(obs.wall_time);
    }

    /// Combine with an accumulator built over a disjoint part of the stream
    pub fn merge(&mut self, other: StatAccumulator) {
        self.observations += other.observations;
        self.total_count += other.total_count;
        self.min_count = self.min_count.min(other.min_count);
        self.max_count = self.max_count.max(other.max_count);
        self.total_wall_time += other.total_wall_time;
        self.min_wall_time = self.min_wall_time.min(other.min_wall_time);
        self.max_wall_time = self.max_wall_time.max(other.max_wall_time);
        self.wall_time_samples.extend(other.wall_time_samples);
    }

    pub fn observations(&self) -> u64 {
        self.observations
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn total_wall_time(&self) -> f64 {
        self.total_wall_time
    }

    /// Normalize per request and estimate the wall-time percentile
    ///
    /// Consumes the accumulator so the wall-time samples are released.
    /// `request_count` must be non-zero; the engine checks this.
    pub fn finalize(mut self, request_count: u64, percentile: f64) -> FinalizedStat {
        let requests = request_count as f64;
        let percentile_wall_time = estimate_percentile(&mut self.wall_time_samples, percentile);

        FinalizedStat {
            avg_count: self.total_count as f64 / requests,
            min_count: self.min_count,
            max_count: self.max_count,
            avg_wall_time: self.total_wall_time / requests,
            min_wall_time: self.min_wall_time,
            max_wall_time: self.max_wall_time,
            percentile_wall_time,
            observations: self.observations,
        }
    }
}

/// Per-request statistics for one key after finalization
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinalizedStat {
    /// Total call count divided by the request count
    pub avg_count: f64,

    pub min_count: u64,
    pub max_count: u64,

    /// Total wall time divided by the request count
    pub avg_wall_time: f64,

    pub min_wall_time: f64,
    pub max_wall_time: f64,

    /// Estimated wall-time percentile, `None` for too few observations
    pub percentile_wall_time: Option<f64>,

    /// Number of samples that touched this key
    pub observations: u64,
}
