//! Unit tests for CLI output formatting

use geosplit::cli::output::{format_report, format_size, format_totals};
use geosplit::{ScanEnd, SplitSummary};

fn summary(unclassified: u64, filtered: u64) -> SplitSummary {
    SplitSummary {
        manifest: Vec::new(),
        features_scanned: 10 + unclassified + filtered,
        features_routed: 10,
        features_unclassified: unclassified,
        features_filtered: filtered,
        bytes_read: 4096,
        scan_end: ScanEnd::Complete,
    }
}

#[test]
fn totals_list_only_nonzero_drop_counts() {
    assert_eq!(format_totals(&summary(0, 0)), "10 features scanned, 10 written");
    assert_eq!(
        format_totals(&summary(2, 0)),
        "12 features scanned, 10 written, 2 without municipality code"
    );
    assert_eq!(
        format_totals(&summary(2, 5)),
        "17 features scanned, 10 written, 2 without municipality code, 5 filtered out"
    );
}

#[test]
fn report_and_sizes() {
    assert_eq!(format_report(&summary(0, 0), "setores"), "Generated 0 files in setores");
    assert_eq!(format_size(512), "512 B");
    assert_eq!(format_size(1536), "1.5 KiB");
}
