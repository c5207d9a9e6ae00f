//! Contract test for the manifest JSON shape

use geosplit::ManifestRecord;
use geosplit::io::manifest::{read_manifest, write_manifest};
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_manifest_fields() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("index.json");

    let records = vec![ManifestRecord {
        code: "3106200".to_string(),
        name: "Belo Horizonte".to_string(),
        feature_count: 2,
        file: "belo_horizonte-3106200.geojson".to_string(),
    }];
    write_manifest(&path, &records).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let parsed: Value = serde_json::from_str(&text).unwrap();
    let entry = &parsed.as_array().expect("manifest is an array")[0];

    assert_eq!(entry["cd_mun"], "3106200");
    assert_eq!(entry["nm_mun"], "Belo Horizonte");
    assert_eq!(entry["total_setores"], 2);
    assert_eq!(entry["file"], "belo_horizonte-3106200.geojson");
    assert_eq!(entry.as_object().unwrap().len(), 4);

    // Two-space indentation, one field per line.
    assert!(text.contains("\n    \"cd_mun\": \"3106200\",\n"));

    assert_eq!(read_manifest(&path).unwrap(), records);
}

#[test]
fn test_manifest_rejects_garbage() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("index.json");
    fs::write(&path, "{not json").unwrap();

    let err = read_manifest(&path).expect_err("garbage must not parse");
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
}
