//! Decoding of a single raw sample blob.
//!
//! A sample is a JSON object mapping call-keys to metric objects:
//!
//! ```json
//! { "main()": { "ct": 1, "wt": 5120 }, "main()==>load": { "ct": 3, "wt": 870 } }
//! ```
//!
//! Fields other than the call count and wall time are ignored. Profiler
//! exports usually store that object zlib-compressed; `ZlibJsonSampleDecoder`
//! inflates it first.

use crate::utils::error::{AggregateError, ParseError};
use flate2::read::ZlibDecoder;
use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use std::io::Read;

/// One sample's contribution for one call-key, as decoded
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RawMetric {
    /// Number of calls
    #[serde(rename = "ct", alias = "count")]
    pub count: i64,

    /// Wall time spent in the calls
    #[serde(rename = "wt", alias = "wall_time")]
    pub wall_time: f64,
}

impl RawMetric {
    pub fn new(count: i64, wall_time: f64) -> Self {
        Self { count, wall_time }
    }
}

/// A validated metric, safe to fold into statistics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub count: u64,
    pub wall_time: f64,
}

impl TryFrom<RawMetric> for Observation {
    type Error = AggregateError;

    fn try_from(raw: RawMetric) -> Result<Self, Self::Error> {
        let count = u64::try_from(raw.count).map_err(|_| {
            AggregateError::InvalidInput(format!("negative call count {}", raw.count))
        })?;

        if !raw.wall_time.is_finite() || raw.wall_time < 0.0 {
            return Err(AggregateError::InvalidInput(format!(
                "invalid wall time {}",
                raw.wall_time
            )));
        }

        Ok(Self {
            count,
            wall_time: raw.wall_time,
        })
    }
}

/// Decoded sample; key order follows the blob
pub type DecodedSample = IndexMap<String, RawMetric>;

/// Turns one opaque blob into a decoded sample
pub trait SampleDecoder {
    fn decode(&self, blob: &[u8]) -> Result<DecodedSample, ParseError>;
}

/// Decoder for uncompressed JSON samples
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSampleDecoder;

impl SampleDecoder for JsonSampleDecoder {
    fn decode(&self, blob: &[u8]) -> Result<DecodedSample, ParseError> {
        decode_sample(blob)
    }
}

/// Decoder for zlib-compressed JSON samples
#[derive(Debug, Clone, Copy, Default)]
pub struct ZlibJsonSampleDecoder;

impl SampleDecoder for ZlibJsonSampleDecoder {
    /// # Errors
    /// * `ParseError::Decompress` - Blob is not a valid zlib stream
    /// * anything `decode_sample` returns for the inflated bytes
    fn decode(&self, blob: &[u8]) -> Result<DecodedSample, ParseError> {
        let mut inflated = Vec::with_capacity(blob.len() * 4);
        ZlibDecoder::new(blob)
            .read_to_end(&mut inflated)
            .map_err(ParseError::Decompress)?;

        debug!("Inflated sample: {} -> {} bytes", blob.len(), inflated.len());
        decode_sample(&inflated)
    }
}

/// Decode a JSON sample blob
///
/// # Errors
/// * `ParseError::JsonError` - Blob is not a JSON object of metrics
/// * `ParseError::InvalidFormat` - Blob is empty
pub fn decode_sample(blob: &[u8]) -> Result<DecodedSample, ParseError> {
    if blob.iter().all(u8::is_ascii_whitespace) {
        return Err(ParseError::InvalidFormat("empty sample".to_string()));
    }

    let sample: DecodedSample = serde_json::from_slice(blob)?;
    debug!("Decoded sample with {} call-keys", sample.len());
    Ok(sample)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_preserves_key_order() {
        let blob = br#"{"z==>a": {"ct": 1, "wt": 2}, "a==>b": {"ct": 3, "wt": 4.5}, "main()": {"ct": 1, "wt": 9}}"#;
        let sample = decode_sample(blob).unwrap();

        let keys: Vec<&str> = sample.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z==>a", "a==>b", "main()"]);
        assert_eq!(sample["a==>b"], RawMetric::new(3, 4.5));
    }

    #[test]
    fn test_decode_ignores_extra_fields() {
        let blob = br#"{"main()": {"ct": 1, "wt": 10, "cpu": 8, "mu": 1024, "pmu": 2048}}"#;
        let sample = decode_sample(blob).unwrap();
        assert_eq!(sample["main()"], RawMetric::new(1, 10.0));
    }

    #[test]
    fn test_decode_long_field_names() {
        let blob = br#"{"main()": {"count": 2, "wall_time": 7}}"#;
        assert_eq!(decode_sample(blob).unwrap()["main()"], RawMetric::new(2, 7.0));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(decode_sample(b"not json"), Err(ParseError::JsonError(_))));
        assert!(matches!(decode_sample(b"[1, 2]"), Err(ParseError::JsonError(_))));
        assert!(matches!(decode_sample(b"  "), Err(ParseError::InvalidFormat(_))));
    }

    #[test]
    fn test_zlib_decoder_inflates_sample() {
        use flate2::write::ZlibEncoder;
        use flate2::Compression;
        use std::io::Write;

        let json = br#"{"main()": {"ct": 1, "wt": 5120}, "main()==>load": {"ct": 3, "wt": 870}}"#;
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(json).unwrap();
        let blob = encoder.finish().unwrap();
        assert_eq!(blob[0], 0x78);

        let sample = ZlibJsonSampleDecoder.decode(&blob).unwrap();
        let keys: Vec<&str> = sample.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["main()", "main()==>load"]);
        assert_eq!(sample["main()==>load"], RawMetric::new(3, 870.0));

        // Plain JSON is not a zlib stream
        assert!(matches!(
            ZlibJsonSampleDecoder.decode(json),
            Err(ParseError::Decompress(_))
        ));
    }

    #[test]
    fn test_observation_validation() {
        assert!(Observation::try_from(RawMetric::new(1, 2.0)).is_ok());
        assert!(matches!(
            Observation::try_from(RawMetric::new(-1, 2.0)),
            Err(AggregateError::InvalidInput(_))
        ));
        assert!(Observation::try_from(RawMetric::new(1, -0.5)).is_err());
        assert!(Observation::try_from(RawMetric::new(1, f64::NAN)).is_err());
    }
}
