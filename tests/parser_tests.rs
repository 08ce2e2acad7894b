use callgraph_console::parser::{
    decode_sample, parse_key, EdgeKey, JsonSampleDecoder, RawMetric, SampleDecoder,
};
use callgraph_console::utils::error::ParseError;

#[test]
fn test_parse_key_edge_and_root() {
    assert_eq!(
        parse_key("Router::dispatch==>UserController::show"),
        EdgeKey {
            caller: Some("Router::dispatch".to_string()),
            callee: "UserController::show".to_string(),
        }
    );
    assert_eq!(parse_key("main()"), EdgeKey::root());
}

#[test]
fn test_decoder_trait_object() {
    let decoder: &dyn SampleDecoder = &JsonSampleDecoder;
    let sample = decoder
        .decode(br#"{"main()": {"ct": 1, "wt": 42}, "main()==>f": {"ct": 2, "wt": 40}}"#)
        .unwrap();

    assert_eq!(sample.len(), 2);
    assert_eq!(sample["main()==>f"], RawMetric::new(2, 40.0));
}

#[test]
fn test_decode_rejects_non_integer_count() {
    let result = decode_sample(br#"{"main()": {"ct": 1.5, "wt": 42}}"#);
    assert!(matches!(result, Err(ParseError::JsonError(_))));
}

#[test]
fn test_decode_requires_both_metrics() {
    assert!(decode_sample(br#"{"main()": {"ct": 1}}"#).is_err());
    assert!(decode_sample(br#"{"main()": {"wt": 1}}"#).is_err());
}
