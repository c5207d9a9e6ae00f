//! File-backed sink factory writing one `.geojson` file per municipality.

use super::SinkFactory;
use std::fs::File;
use std::io::{BufWriter, ErrorKind, Result};
use std::path::{Path, PathBuf};

/// Write buffer per open output file.
const WRITE_BUFFER_CAPACITY: usize = 64 * 1024;

/// Factory creating buffered files inside an output directory.
#[derive(Debug, Clone)]
pub struct FileSinkFactory {
    out_dir: PathBuf,
}

impl FileSinkFactory {
    pub fn new<P: AsRef<Path>>(out_dir: P) -> Self {
        Self {
            out_dir: out_dir.as_ref().to_path_buf(),
        }
    }

    #[must_use]
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }
}

impl SinkFactory for FileSinkFactory {
    type Writer = BufWriter<File>;

    fn create(&mut self, identifier: &str) -> Result<BufWriter<File>> {
        let path = self.out_dir.join(identifier);
        let file = File::create(&path)?;
        log::debug!("Created output file {}", path.display());
        Ok(BufWriter::with_capacity(WRITE_BUFFER_CAPACITY, file))
    }

    fn discard(&mut self, identifier: &str) -> Result<()> {
        match std::fs::remove_file(self.out_dir.join(identifier)) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}
