//! Contract test for generated FeatureCollection files

use crate::fixtures::{collection, run_memory, tract};
use geosplit::SplitOptions;
use serde_json::Value;

#[test]
fn test_outputs_are_feature_collections_in_encounter_order() {
    let features: Vec<String> = (0..5)
        .map(|i| tract("3106200", "Belo Horizonte", &format!("31062000500000{i}")))
        .collect();
    let outcome =
        run_memory(vec![Ok(collection(&features).into_bytes())], &SplitOptions::default())
            .unwrap();

    assert_eq!(outcome.outputs.len(), 1);
    let doc: Value = serde_json::from_slice(&outcome.outputs[0].1).unwrap();
    let object = doc.as_object().unwrap();
    let keys: Vec<&str> = object.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["type", "features"]);
    assert_eq!(doc["type"], "FeatureCollection");

    let written = doc["features"].as_array().unwrap();
    assert_eq!(written.len(), 5);
    for (i, feature) in written.iter().enumerate() {
        assert_eq!(
            feature["properties"]["CD_SETOR"],
            format!("31062000500000{i}")
        );
    }
}

#[test]
fn test_property_order_is_preserved() {
    let feature = r#"{"type":"Feature","properties":{"Z":1,"CD_MUN":"1","A":2,"NM_MUN":"X"},"geometry":null}"#;
    let outcome = run_memory(
        vec![Ok(collection(&[feature.to_string()]).into_bytes())],
        &SplitOptions::default(),
    )
    .unwrap();

    let text = String::from_utf8(outcome.outputs[0].1.clone()).unwrap();
    assert!(text.contains(r#""properties":{"Z":1,"CD_MUN":"1","A":2,"NM_MUN":"X"}"#));
}

/// Deterministic 17-significant-digit longitudes and latitudes
fn precise_coordinates(count: usize) -> Vec<String> {
    let mut state: u64 = 0x5DEE_CE66_D1CE_4E5B;
    (0..count)
        .map(|i| {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            let digits = (state >> 11) % 1_000_000_000_000_000;
            let whole = if i % 2 == 0 { 43 } else { 19 };
            format!("-{whole}.{digits:015}")
        })
        .collect()
}

#[test]
fn test_coordinates_keep_their_exact_double_value() {
    let source = precise_coordinates(4_000);
    let pairs: Vec<String> = source
        .chunks(2)
        .map(|pair| format!("[{},{}]", pair[0], pair[1]))
        .collect();
    let feature = format!(
        r#"{{"type":"Feature","properties":{{"CD_MUN":"3106200","NM_MUN":"Belo Horizonte"}},"geometry":{{"type":"LineString","coordinates":[{}]}}}}"#,
        pairs.join(",")
    );
    let outcome = run_memory(
        vec![Ok(collection(&[feature]).into_bytes())],
        &SplitOptions::default(),
    )
    .unwrap();

    let text = String::from_utf8(outcome.outputs[0].1.clone()).unwrap();
    let start = text.find(r#""coordinates":"#).unwrap() + r#""coordinates":"#.len();
    let end = start + text[start..].find("]]").unwrap();
    let written: Vec<&str> = text[start..end]
        .split(|c| c == '[' || c == ']' || c == ',')
        .filter(|token| !token.is_empty())
        .collect();

    assert_eq!(written.len(), source.len());
    for (src, out) in source.iter().zip(&written) {
        let exact: f64 = src.parse().unwrap();
        let value: f64 = out.parse().unwrap();
        assert_eq!(value.to_bits(), exact.to_bits(), "{src} written as {out}");
    }
}
