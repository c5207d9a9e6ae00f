//! Manifest read/write operations
//!
//! The manifest is a pretty-printed JSON array with one object per generated
//! file, already sorted by municipality name when it reaches this module.

use crate::ManifestRecord;
use std::fs::File;
use std::io::{BufReader, BufWriter, Error, ErrorKind, Result, Write};
use std::path::Path;

/// Write the manifest to `path`, creating parent directories as needed.
pub fn write_manifest<P: AsRef<Path>>(path: P, records: &[ManifestRecord]) -> Result<()> {
    let file_path = path.as_ref();

    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(File::create(file_path)?);
    serde_json::to_writer_pretty(&mut writer, records).map_err(Error::other)?;
    writer.flush()?;
    Ok(())
}

/// Read a manifest previously written by [`write_manifest`].
pub fn read_manifest<P: AsRef<Path>>(path: P) -> Result<Vec<ManifestRecord>> {
    let file = File::open(path)?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| Error::new(ErrorKind::InvalidData, e))
}
