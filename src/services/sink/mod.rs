//! Per-municipality output sinks.
//!
//! Each sink is a [`CollectionWriter`] framing its features as one complete
//! `FeatureCollection` document. Where the bytes go is decided by a
//! [`SinkFactory`]; the [`registry::SinkRegistry`] owns one writer per code.

use serde_json::Value;
use std::io::{self, Write};

/// Opening framing written as soon as a sink is created.
pub const COLLECTION_OPEN: &[u8] = br#"{"type":"FeatureCollection","features":["#;

/// Closing framing written exactly once when a sink is finished.
pub const COLLECTION_CLOSE: &[u8] = b"]}";

/// Creates the byte destination behind each sink.
pub trait SinkFactory {
    type Writer: Write;

    /// Open a destination for the given output identifier.
    fn create(&mut self, identifier: &str) -> io::Result<Self::Writer>;

    /// Remove whatever was written for `identifier` after a failed run.
    fn discard(&mut self, _identifier: &str) -> io::Result<()> {
        Ok(())
    }
}

/// Incremental `FeatureCollection` serializer.
///
/// Valid JSON once [`finish`](Self::finish) has run, for any number of features.
#[derive(Debug)]
pub struct CollectionWriter<W: Write> {
    writer: W,
    count: u64,
}

impl<W: Write> CollectionWriter<W> {
    /// Wrap `writer` and emit the opening framing.
    pub fn new(mut writer: W) -> io::Result<Self> {
        writer.write_all(COLLECTION_OPEN)?;
        Ok(Self { writer, count: 0 })
    }

    /// Append one feature, preceded by a separator unless it is the first.
    pub fn write_feature(&mut self, feature: &Value) -> io::Result<()> {
        if self.count > 0 {
            self.writer.write_all(b",")?;
        }
        serde_json::to_writer(&mut self.writer, feature)?;
        self.count += 1;
        Ok(())
    }

    #[must_use]
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Emit the closing framing, flush, and hand back the inner writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.writer.write_all(COLLECTION_CLOSE)?;
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// A sink after its closing framing has been written.
#[derive(Debug)]
pub struct ClosedSink<W> {
    pub code: String,
    pub name: String,
    pub identifier: String,
    pub count: u64,
    pub writer: W,
}

pub mod file;
pub mod memory;
pub mod registry;
