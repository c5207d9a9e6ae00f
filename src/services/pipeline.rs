//! Split pipeline: chunks → scanner → parse → classify → route → manifest.
//!
//! All mutable run state lives in one [`SplitContext`] owned by the run. The
//! driving loop is synchronous: each chunk is scanned to completion and every
//! feature found in it is routed before the next chunk is requested.

use crate::models::ManifestRecord;
use crate::services::classify::Classifier;
use crate::services::manifest::ManifestBuilder;
use crate::services::progress::{ProgressCounters, ProgressThrottler};
use crate::services::scanner::{FeatureStream, ScanEnd};
use crate::services::sink::SinkFactory;
use crate::services::sink::registry::SinkRegistry;
use crate::{Error, ProgressNotifier, Result, SplitOptions};
use std::io;
use std::time::Instant;

/// Totals and manifest of a completed run.
#[derive(Debug, Clone)]
pub struct SplitSummary {
    /// Manifest records sorted by display name.
    pub manifest: Vec<ManifestRecord>,
    pub features_scanned: u64,
    pub features_routed: u64,
    /// Features without a resolvable municipality code.
    pub features_unclassified: u64,
    /// Features rejected by the target code filter.
    pub features_filtered: u64,
    pub bytes_read: u64,
    pub scan_end: ScanEnd,
}

/// Summary plus the finished writer of every sink, in creation order.
#[derive(Debug)]
pub struct SplitOutcome<W> {
    pub summary: SplitSummary,
    pub outputs: Vec<(String, W)>,
}

struct SplitContext<'a, F: SinkFactory, C: Classifier + ?Sized> {
    classifier: &'a C,
    registry: SinkRegistry<F>,
    counters: ProgressCounters,
    features_unclassified: u64,
    features_filtered: u64,
    progress: Option<(ProgressThrottler, ProgressNotifier)>,
}

impl<'a, F: SinkFactory, C: Classifier + ?Sized> SplitContext<'a, F, C> {
    fn new(factory: F, classifier: &'a C, opts: &SplitOptions) -> Self {
        let progress = opts.progress_notifier.clone().map(|notifier| {
            (
                ProgressThrottler::new(opts.progress_interval, Instant::now()),
                notifier,
            )
        });

        Self {
            classifier,
            registry: SinkRegistry::new(factory, opts.target_code.clone()),
            counters: ProgressCounters::default(),
            features_unclassified: 0,
            features_filtered: 0,
            progress,
        }
    }

    fn ingest<I>(&mut self, stream: &mut FeatureStream<I>) -> Result<()>
    where
        I: Iterator<Item = io::Result<Vec<u8>>>,
    {
        while let Some(raw) = stream.next() {
            let raw = raw?;
            self.counters.bytes_read = stream.scanner().bytes_consumed();
            self.handle(&raw)?;
            self.report_progress();
        }
        self.counters.bytes_read = stream.scanner().bytes_consumed();
        Ok(())
    }

    fn handle(&mut self, raw: &[u8]) -> Result<()> {
        self.counters.features_scanned += 1;

        let feature: serde_json::Value =
            serde_json::from_slice(raw).map_err(|source| Error::Parse {
                feature: self.counters.features_scanned,
                source,
            })?;

        let Some(class) = self.classifier.classify(&feature) else {
            self.features_unclassified += 1;
            return Ok(());
        };

        if self.registry.route(&class, &feature)? {
            self.counters.features_routed += 1;
        } else {
            self.features_filtered += 1;
        }
        Ok(())
    }

    fn report_progress(&mut self) {
        if let Some((throttler, notifier)) = self.progress.as_mut()
            && let Some(snapshot) = throttler.consider(Instant::now(), self.counters)
        {
            notifier(&snapshot);
        }
    }

    fn finish(mut self, scan_end: ScanEnd) -> Result<SplitOutcome<F::Writer>> {
        if let Some((throttler, notifier)) = self.progress.as_mut() {
            notifier(&throttler.force_emit(Instant::now(), self.counters));
        }

        let closed = self.registry.close_all()?;

        let mut manifest = ManifestBuilder::new();
        let mut outputs = Vec::with_capacity(closed.len());
        for sink in closed {
            manifest.record(ManifestRecord {
                code: sink.code,
                name: sink.name,
                feature_count: sink.count,
                file: sink.identifier.clone(),
            });
            outputs.push((sink.identifier, sink.writer));
        }

        let summary = SplitSummary {
            manifest: manifest.finish(),
            features_scanned: self.counters.features_scanned,
            features_routed: self.counters.features_routed,
            features_unclassified: self.features_unclassified,
            features_filtered: self.features_filtered,
            bytes_read: self.counters.bytes_read,
            scan_end,
        };

        log::info!(
            "Split {} features into {} files ({} unclassified, {} filtered, {} bytes read)",
            summary.features_routed,
            summary.manifest.len(),
            summary.features_unclassified,
            summary.features_filtered,
            summary.bytes_read
        );

        Ok(SplitOutcome { summary, outputs })
    }
}

/// Run the split over any chunk sequence.
///
/// # Arguments
/// * `chunks` - The input as a finite sequence of byte chunks
/// * `factory` - Creates the destination of each per-municipality sink
/// * `classifier` - Derives the municipality code and name of each feature
/// * `opts` - Target code filter and progress reporting
///
/// # Errors
/// A chunk read failure, a malformed feature, or a sink write failure aborts
/// the run. Sinks opened before the failure are discarded through the factory.
pub fn split_stream<I, F, C>(
    chunks: I,
    factory: F,
    classifier: &C,
    opts: &SplitOptions,
) -> Result<SplitOutcome<F::Writer>>
where
    I: IntoIterator<Item = io::Result<Vec<u8>>>,
    F: SinkFactory,
    C: Classifier + ?Sized,
{
    let mut ctx = SplitContext::new(factory, classifier, opts);
    let mut stream = FeatureStream::new(chunks);

    if let Err(e) = ctx.ingest(&mut stream) {
        log::warn!("Aborting split after {} features: {e}", ctx.counters.features_scanned);
        ctx.registry.abort();
        return Err(e);
    }

    ctx.finish(stream.scanner().finish())
}
