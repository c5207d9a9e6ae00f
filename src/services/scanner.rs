//! Incremental extraction of feature objects from a chunked GeoJSON stream.
//!
//! The scanner never parses the document. It walks the raw bytes one at a time,
//! looking for the `"features"` key, the array that follows it, and then the
//! balanced `{ ... }` span of every array element. Structural bytes inside
//! string literals are ignored, including escaped quotes.
//!
//! Invariants:
//! - State survives chunk boundaries, so any split of the same input yields the
//!   same sequence of features.
//! - Outside of a capture no input bytes are retained. While capturing, only the
//!   bytes of the object being captured are retained.
//! - Every yielded byte string starts with `{`, ends with the matching `}`, and
//!   is exactly the textual span of one array element.
//! - The `"features"` key is matched once. After its array closes, objects in
//!   any later array are captured as well.

use std::collections::VecDeque;
use std::io::Result;

/// The key token introducing the features array, quotes included.
const FEATURES_KEY: &[u8] = b"\"features\"";

/// Position relative to JSON string literals while capturing an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringState {
    Outside,
    Inside,
    /// Inside a string, directly after a backslash.
    Escape,
}

/// Parse-position mode of the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    /// Looking for the `"features"` token; `matched` bytes of it seen so far.
    Seeking { matched: usize },
    /// Token found, waiting for the opening `[`.
    AwaitingArray,
    /// Between elements of the features array.
    InArray,
    /// Inside one element object.
    Capturing { depth: usize, string: StringState },
}

/// How the input ended, as seen by the scanner.
///
/// None of these is an error: the scanner only ever yields complete objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanEnd {
    Complete,
    NoFeaturesKey,
    MissingArray,
    UnterminatedArray,
    UnterminatedFeature { bytes: usize },
}

enum Step {
    Continue,
    Open,
    Close,
}

/// Byte-level state machine splitting the features array into objects.
#[derive(Debug)]
pub struct FeatureScanner {
    mode: ScanMode,
    buffer: Vec<u8>,
    bytes_consumed: u64,
    features_found: u64,
    arrays_closed: u64,
}

impl Default for FeatureScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureScanner {
    #[must_use]
    pub fn new() -> Self {
        Self {
            mode: ScanMode::Seeking { matched: 0 },
            buffer: Vec::new(),
            bytes_consumed: 0,
            features_found: 0,
            arrays_closed: 0,
        }
    }

    #[must_use]
    pub fn mode(&self) -> ScanMode {
        self.mode
    }

    #[must_use]
    pub fn bytes_consumed(&self) -> u64 {
        self.bytes_consumed
    }

    #[must_use]
    pub fn features_found(&self) -> u64 {
        self.features_found
    }

    /// Number of element arrays closed so far.
    #[must_use]
    pub fn arrays_closed(&self) -> u64 {
        self.arrays_closed
    }

    /// Bytes currently held for an object that has not closed yet.
    #[must_use]
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    /// Consume one chunk, returning every feature object completed within it.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<Vec<u8>> {
        let mut completed = Vec::new();
        // Start of the object being captured, relative to this chunk. Stays 0
        // when the capture began in an earlier chunk.
        let mut start = 0usize;

        for (i, &byte) in chunk.iter().enumerate() {
            match self.step(byte) {
                Step::Continue => {}
                Step::Open => start = i,
                Step::Close => {
                    self.buffer.extend_from_slice(&chunk[start..=i]);
                    completed.push(std::mem::take(&mut self.buffer));
                    self.features_found += 1;
                }
            }
        }

        if matches!(self.mode, ScanMode::Capturing { .. }) {
            self.buffer.extend_from_slice(&chunk[start..]);
        }

        self.bytes_consumed += chunk.len() as u64;
        completed
    }

    /// Report how the input ended. Does not consume the scanner.
    ///
    /// Input is `Complete` once at least one array has closed and no later
    /// array or object was left open.
    #[must_use]
    pub fn finish(&self) -> ScanEnd {
        match self.mode {
            ScanMode::Seeking { .. } => ScanEnd::NoFeaturesKey,
            ScanMode::AwaitingArray if self.arrays_closed > 0 => ScanEnd::Complete,
            ScanMode::AwaitingArray => ScanEnd::MissingArray,
            ScanMode::InArray => ScanEnd::UnterminatedArray,
            ScanMode::Capturing { .. } => ScanEnd::UnterminatedFeature {
                bytes: self.buffer.len(),
            },
        }
    }

    fn step(&mut self, byte: u8) -> Step {
        let (next, step) = match self.mode {
            ScanMode::Seeking { matched } => {
                let matched = if byte == FEATURES_KEY[matched] {
                    matched + 1
                } else if byte == FEATURES_KEY[0] {
                    // The token's only quote prefix is the leading one.
                    1
                } else {
                    0
                };
                if matched == FEATURES_KEY.len() {
                    (ScanMode::AwaitingArray, Step::Continue)
                } else {
                    (ScanMode::Seeking { matched }, Step::Continue)
                }
            }
            ScanMode::AwaitingArray => match byte {
                b'[' => (ScanMode::InArray, Step::Continue),
                _ => (ScanMode::AwaitingArray, Step::Continue),
            },
            ScanMode::InArray => match byte {
                b'{' => (
                    ScanMode::Capturing {
                        depth: 1,
                        string: StringState::Outside,
                    },
                    Step::Open,
                ),
                // The key search does not restart; the next `[` re-arms capture.
                b']' => {
                    self.arrays_closed += 1;
                    (ScanMode::AwaitingArray, Step::Continue)
                }
                _ => (ScanMode::InArray, Step::Continue),
            },
            ScanMode::Capturing { depth, string } => capture_step(depth, string, byte),
        };

        self.mode = next;
        step
    }
}

fn capture_step(depth: usize, string: StringState, byte: u8) -> (ScanMode, Step) {
    let capturing = |depth, string| ScanMode::Capturing { depth, string };

    match string {
        StringState::Escape => (capturing(depth, StringState::Inside), Step::Continue),
        StringState::Inside => match byte {
            b'\\' => (capturing(depth, StringState::Escape), Step::Continue),
            b'"' => (capturing(depth, StringState::Outside), Step::Continue),
            _ => (capturing(depth, StringState::Inside), Step::Continue),
        },
        StringState::Outside => match byte {
            b'"' => (capturing(depth, StringState::Inside), Step::Continue),
            b'{' => (capturing(depth + 1, string), Step::Continue),
            b'}' if depth == 1 => (ScanMode::InArray, Step::Close),
            b'}' => (capturing(depth - 1, string), Step::Continue),
            _ => (capturing(depth, string), Step::Continue),
        },
    }
}

/// Lazy sequence of feature objects pulled from a chunk iterator.
///
/// Chunks are requested only when no completed feature is pending. A chunk
/// read error is yielded once and ends the stream.
pub struct FeatureStream<I> {
    chunks: I,
    scanner: FeatureScanner,
    pending: VecDeque<Vec<u8>>,
    exhausted: bool,
}

impl<I> FeatureStream<I>
where
    I: Iterator<Item = Result<Vec<u8>>>,
{
    pub fn new<C>(chunks: C) -> Self
    where
        C: IntoIterator<IntoIter = I>,
    {
        Self {
            chunks: chunks.into_iter(),
            scanner: FeatureScanner::new(),
            pending: VecDeque::new(),
            exhausted: false,
        }
    }

    #[must_use]
    pub fn scanner(&self) -> &FeatureScanner {
        &self.scanner
    }
}

impl<I> Iterator for FeatureStream<I>
where
    I: Iterator<Item = Result<Vec<u8>>>,
{
    type Item = Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(feature) = self.pending.pop_front() {
                return Some(Ok(feature));
            }
            if self.exhausted {
                return None;
            }

            match self.chunks.next() {
                Some(Ok(chunk)) => self.pending.extend(self.scanner.push(&chunk)),
                Some(Err(e)) => {
                    self.exhausted = true;
                    return Some(Err(e));
                }
                None => {
                    self.exhausted = true;
                    log_scan_end(self.scanner.finish(), self.scanner.bytes_consumed());
                }
            }
        }
    }
}

fn log_scan_end(end: ScanEnd, bytes: u64) {
    match end {
        ScanEnd::Complete => log::debug!("Features array closed after {bytes} bytes"),
        ScanEnd::NoFeaturesKey => log::debug!("No \"features\" key found in {bytes} bytes"),
        ScanEnd::MissingArray => {
            log::warn!("\"features\" key found but no array followed it");
        }
        ScanEnd::UnterminatedArray => {
            log::warn!("Input ended before the features array was closed");
        }
        ScanEnd::UnterminatedFeature { bytes: partial } => {
            log::warn!("Input ended inside a feature; discarded {partial} buffered bytes");
        }
    }
}
