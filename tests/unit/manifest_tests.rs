//! Unit tests for manifest ordering

use geosplit::ManifestRecord;
use geosplit::services::manifest::{ManifestBuilder, compare_names};
use std::cmp::Ordering;

fn record(code: &str, name: &str, count: u64) -> ManifestRecord {
    ManifestRecord {
        code: code.to_string(),
        name: name.to_string(),
        feature_count: count,
        file: format!("{code}.geojson"),
    }
}

#[test]
fn sorted_by_name_ignoring_accents_and_case() {
    let mut builder = ManifestBuilder::new();
    builder.record(record("3170206", "Uberlândia", 1));
    builder.record(record("3100104", "Abaeté", 3));
    builder.record(record("3106200", "Belo Horizonte", 2));
    builder.record(record("3101003", "Águas Vermelhas", 4));
    assert_eq!(builder.len(), 4);

    let names: Vec<String> = builder.finish().into_iter().map(|r| r.name).collect();
    assert_eq!(
        names,
        vec!["Abaeté", "Águas Vermelhas", "Belo Horizonte", "Uberlândia"]
    );
}

#[test]
fn ties_are_deterministic() {
    let build = |order: &[ManifestRecord]| {
        let mut builder = ManifestBuilder::new();
        for r in order {
            builder.record(r.clone());
        }
        builder.finish()
    };

    let a = record("2", "Santa Rita", 1);
    let b = record("1", "Santa Rita", 1);
    let c = record("3", "santa rita", 1);

    let first = build(&[a.clone(), b.clone(), c.clone()]);
    let second = build(&[c, b, a]);
    assert_eq!(first, second);

    let codes: Vec<&str> = first.iter().map(|r| r.code.as_str()).collect();
    assert_eq!(codes, vec!["1", "2", "3"]);
}

#[test]
fn empty_builder_yields_empty_manifest() {
    let builder = ManifestBuilder::new();
    assert!(builder.is_empty());
    assert!(builder.finish().is_empty());
}

#[test]
fn compare_names_orders_accents_after_base_letter() {
    assert_eq!(compare_names("Ébano", "Ebano"), Ordering::Greater);
    assert_eq!(compare_names("Araxá", "Arcos"), Ordering::Less);
    assert_eq!(compare_names("itabira", "Itabirito"), Ordering::Less);
}
