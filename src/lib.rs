//! Callgraph Console
//!
//! Aggregates per-request call-graph profiling samples into per-method and
//! per-edge statistics (average, minimum, maximum and a high percentile of
//! wall time) and lets an operator walk callers and callees interactively.
//!
//! This crate provides the core implementation for the
//! `callgraph-console` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! callgraph-console explore --input samples.jsonl
//! callgraph-console summary --input samples/ --top 10
//! ```

pub mod aggregator;
pub mod commands;
pub mod navigator;
pub mod output;
pub mod parser;
pub mod source;
pub mod utils;
