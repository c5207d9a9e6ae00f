//! Data models for manifest records and progress reporting

use serde::{Deserialize, Serialize};

/// One manifest entry describing a generated per-municipality file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestRecord {
    #[serde(rename = "cd_mun")]
    pub code: String,
    #[serde(rename = "nm_mun")]
    pub name: String,
    #[serde(rename = "total_setores")]
    pub feature_count: u64,
    pub file: String,
}

/// Point-in-time view of pipeline progress
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub timestamp_ms: u64,
    pub bytes_read: u64,
    pub features_scanned: u64,
    pub features_routed: u64,
}
