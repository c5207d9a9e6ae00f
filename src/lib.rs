//! GeoJSON Feature Splitting Library
//!
//! This library streams a single large GeoJSON `FeatureCollection` and fans its
//! features out into one `FeatureCollection` file per municipality code, without
//! ever holding the whole document in memory. A sorted manifest describing the
//! generated files is written once the input is exhausted.

pub mod cli;
pub mod io;
pub mod models;
pub mod services;

pub use models::{ManifestRecord, ProgressSnapshot};
pub use services::pipeline::{SplitOutcome, SplitSummary, split_stream};
pub use services::scanner::ScanEnd;

use services::classify::MunicipalityClassifier;
use services::sink::file::FileSinkFactory;
use std::path::{Path, PathBuf};
use std::result;
use std::sync::Arc;
use std::time::Duration;

/// Default number of bytes requested from the input per chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Default manifest file name inside the output directory.
pub const MANIFEST_FILE_NAME: &str = "index.json";

/// Custom error type for the library
#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    InvalidInput(String),
    Parse {
        feature: u64,
        source: serde_json::Error,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {e}"),
            Error::InvalidInput(msg) => write!(f, "Invalid input: {msg}"),
            Error::Parse { feature, source } => {
                write!(f, "Malformed feature #{feature}: {source}")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Parse { source, .. } => Some(source),
            Error::InvalidInput(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

pub type Result<T> = result::Result<T, Error>;

/// Callback invoked with throttled progress snapshots.
pub type ProgressNotifier = Arc<dyn Fn(&ProgressSnapshot) + Send + Sync>;

/// Options for a split run
#[derive(Clone)]
pub struct SplitOptions {
    /// When set, only features with this municipality code are written.
    pub target_code: Option<String>,
    pub chunk_size: usize,
    pub progress_interval: Duration,
    pub progress_notifier: Option<ProgressNotifier>,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            target_code: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
            progress_interval: Duration::from_secs(2),
            progress_notifier: None,
        }
    }
}

impl std::fmt::Debug for SplitOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SplitOptions")
            .field("target_code", &self.target_code)
            .field("chunk_size", &self.chunk_size)
            .field("progress_interval", &self.progress_interval)
            .field("progress_notifier", &self.progress_notifier.is_some())
            .finish()
    }
}

/// Split a GeoJSON file into per-municipality files and write the manifest
///
/// # Arguments
/// * `input` - The source `FeatureCollection` file
/// * `out_dir` - Directory receiving one `.geojson` file per municipality
/// * `manifest_path` - Manifest location; defaults to `out_dir/index.json`
/// * `opts` - Split options
///
/// # Returns
/// A summary with the sorted manifest and run counters
pub fn split_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    out_dir: Q,
    manifest_path: Option<&Path>,
    opts: &SplitOptions,
) -> Result<SplitSummary> {
    let input = input.as_ref();
    let input_display = input.to_string_lossy().to_string();

    if !input.exists() {
        return Err(Error::InvalidInput(format!(
            "Path does not exist: {input_display}"
        )));
    }

    if !input.is_file() {
        return Err(Error::InvalidInput(format!(
            "Path is not a file: {input_display}"
        )));
    }

    let out_dir = out_dir.as_ref();
    std::fs::create_dir_all(out_dir)?;

    let manifest_path: PathBuf = manifest_path
        .map_or_else(|| out_dir.join(MANIFEST_FILE_NAME), Path::to_path_buf);

    let file = std::fs::File::open(input)?;
    let chunks = io::chunks::ChunkReader::new(file, opts.chunk_size);
    let factory = FileSinkFactory::new(out_dir);
    let classifier = MunicipalityClassifier::new()
        .map_err(|e| Error::InvalidInput(format!("invalid property pattern: {e}")))?;

    let outcome = split_stream(chunks, factory, &classifier, opts)?;

    io::manifest::write_manifest(&manifest_path, &outcome.summary.manifest)?;
    log::info!(
        "Wrote manifest with {} entries to {}",
        outcome.summary.manifest.len(),
        manifest_path.display()
    );

    Ok(outcome.summary)
}
