//! Output formatting for CLI

use crate::models::ProgressSnapshot;
use crate::SplitSummary;
use std::fmt::Write;

const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];

/// Human-readable byte count with binary units
#[must_use]
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{bytes} B");
    }

    #[allow(clippy::cast_precision_loss)]
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

/// One progress line for stderr
#[must_use]
pub fn format_progress(snapshot: &ProgressSnapshot) -> String {
    #[allow(clippy::cast_precision_loss)]
    let elapsed_secs = snapshot.timestamp_ms as f64 / 1000.0;
    format!(
        "[{elapsed_secs:6.1}s] {} read, {} features scanned, {} routed",
        format_size(snapshot.bytes_read),
        snapshot.features_scanned,
        snapshot.features_routed
    )
}

/// Final report line printed on success
#[must_use]
pub fn format_report(summary: &SplitSummary, out_dir: &str) -> String {
    format!("Generated {} files in {out_dir}", summary.manifest.len())
}

/// Run totals for stderr, shown unless `--quiet`
#[must_use]
pub fn format_totals(summary: &SplitSummary) -> String {
    let mut text = format!(
        "{} features scanned, {} written",
        summary.features_scanned, summary.features_routed
    );
    // Writing into a String cannot fail.
    if summary.features_unclassified > 0 {
        let _ = write!(
            text,
            ", {} without municipality code",
            summary.features_unclassified
        );
    }
    if summary.features_filtered > 0 {
        let _ = write!(text, ", {} filtered out", summary.features_filtered);
    }
    text
}
