//! Registry owning exactly one open sink per municipality code.

use super::{ClosedSink, CollectionWriter, SinkFactory};
use crate::services::classify::Classification;
use crate::services::slug::output_identifier;
use serde_json::Value;
use std::collections::HashMap;
use std::io;

struct SinkEntry<W: io::Write> {
    code: String,
    name: String,
    identifier: String,
    writer: CollectionWriter<W>,
}

/// Lazily creates sinks on first use and closes them all at end of input.
///
/// Dropping a registry that still has open sinks discards their partial
/// output through the factory, so a failed run leaves no truncated files.
pub struct SinkRegistry<F: SinkFactory> {
    factory: F,
    target_code: Option<String>,
    entries: Vec<SinkEntry<F::Writer>>,
    by_code: HashMap<String, usize>,
}

impl<F: SinkFactory> SinkRegistry<F> {
    pub fn new(factory: F, target_code: Option<String>) -> Self {
        Self {
            factory,
            target_code: target_code.filter(|code| !code.is_empty()),
            entries: Vec::new(),
            by_code: HashMap::new(),
        }
    }

    /// Whether features with `code` may acquire a sink under the active filter.
    #[must_use]
    pub fn accepts(&self, code: &str) -> bool {
        self.target_code.as_deref().is_none_or(|target| target == code)
    }

    /// Number of sinks created so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append `feature` to the sink for its code, creating the sink if needed.
    ///
    /// Returns `false` without writing when the filter rejects the code.
    pub fn route(&mut self, class: &Classification, feature: &Value) -> io::Result<bool> {
        if !self.accepts(&class.code) {
            return Ok(false);
        }

        let existing = self.by_code.get(&class.code).copied();
        let idx = match existing {
            Some(idx) => idx,
            None => self.open(class)?,
        };

        let entry = &mut self.entries[idx];
        entry.writer.write_feature(feature)?;
        log::trace!(
            "Routed feature #{} to {}",
            entry.writer.count(),
            entry.identifier
        );
        Ok(true)
    }

    fn open(&mut self, class: &Classification) -> io::Result<usize> {
        let identifier = output_identifier(&class.code, &class.name);
        let writer = CollectionWriter::new(self.factory.create(&identifier)?)?;
        log::debug!(
            "Opened sink {identifier} for {} ({})",
            class.code,
            class.name
        );

        let idx = self.entries.len();
        self.entries.push(SinkEntry {
            code: class.code.clone(),
            name: class.name.clone(),
            identifier,
            writer,
        });
        self.by_code.insert(class.code.clone(), idx);
        Ok(idx)
    }

    /// Write the closing framing of every sink, in creation order.
    ///
    /// If any sink fails to close, every sink of this run is discarded and the
    /// error is returned.
    pub fn close_all(mut self) -> io::Result<Vec<ClosedSink<F::Writer>>> {
        let entries = std::mem::take(&mut self.entries);
        self.by_code.clear();
        let identifiers: Vec<String> = entries.iter().map(|e| e.identifier.clone()).collect();

        let mut closed = Vec::with_capacity(entries.len());
        let mut pending = entries.into_iter();
        let result = pending.by_ref().try_for_each(|entry| {
            let count = entry.writer.count();
            let writer = entry.writer.finish()?;
            closed.push(ClosedSink {
                code: entry.code,
                name: entry.name,
                identifier: entry.identifier,
                count,
                writer,
            });
            Ok::<(), io::Error>(())
        });

        if let Err(e) = result {
            drop(pending);
            drop(closed);
            self.discard(&identifiers);
            return Err(e);
        }

        Ok(closed)
    }

    /// Drop every open sink and discard its partial output.
    pub fn abort(mut self) {
        self.discard_open();
    }

    fn discard_open(&mut self) {
        let entries = std::mem::take(&mut self.entries);
        self.by_code.clear();
        let identifiers: Vec<String> = entries.iter().map(|e| e.identifier.clone()).collect();
        drop(entries);
        self.discard(&identifiers);
    }

    fn discard(&mut self, identifiers: &[String]) {
        for identifier in identifiers {
            if let Err(e) = self.factory.discard(identifier) {
                log::warn!("Failed to discard partial output {identifier}: {e}");
            } else {
                log::debug!("Discarded partial output {identifier}");
            }
        }
    }
}

impl<F: SinkFactory> Drop for SinkRegistry<F> {
    fn drop(&mut self) {
        if !self.entries.is_empty() {
            self.discard_open();
        }
    }
}
