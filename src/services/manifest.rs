//! Manifest accumulation and name ordering.

use crate::models::ManifestRecord;
use crate::services::slug::fold_diacritics;
use std::cmp::Ordering;

/// Collects one record per closed sink and sorts them once at the end.
#[derive(Debug, Default)]
pub struct ManifestBuilder {
    records: Vec<ManifestRecord>,
}

impl ManifestBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, record: ManifestRecord) {
        self.records.push(record);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records sorted by display name.
    #[must_use]
    pub fn finish(self) -> Vec<ManifestRecord> {
        let mut keyed: Vec<(String, ManifestRecord)> = self
            .records
            .into_iter()
            .map(|record| (collation_key(&record.name), record))
            .collect();

        keyed.sort_by(|(ka, a), (kb, b)| {
            ka.cmp(kb)
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| a.code.cmp(&b.code))
        });

        keyed.into_iter().map(|(_, record)| record).collect()
    }
}

/// Compare display names the way a Portuguese-speaking reader would order them.
///
/// Accents and case only break ties, so `Águas Vermelhas` sorts between
/// `Abaeté` and `Belo Horizonte` instead of after every unaccented name.
#[must_use]
pub fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

fn collation_key(name: &str) -> String {
    fold_diacritics(name).to_lowercase()
}
