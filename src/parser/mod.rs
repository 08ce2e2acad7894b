//! Call-key parsing and sample decoding.
//!
//! This module handles:
//! - Splitting call-keys into caller/callee pairs
//! - Decoding raw sample blobs (plain or zlib-compressed JSON) into per-key metrics
//! - Validating metrics before aggregation

pub mod key;
pub mod sample;

// Re-export main types
pub use key::{parse_key, EdgeKey};
pub use sample::{
    decode_sample, DecodedSample, JsonSampleDecoder, Observation, RawMetric, SampleDecoder,
    ZlibJsonSampleDecoder,
};
