//! Pull-based chunk source over any reader.

use std::io::{ErrorKind, Read, Result};

/// Iterator yielding the input as successive byte chunks.
///
/// The sequence is finite and non-restartable: once the reader reports EOF or
/// a read fails, the iterator is fused and yields nothing further.
pub struct ChunkReader<R> {
    reader: R,
    chunk_size: usize,
    done: bool,
}

impl<R: Read> ChunkReader<R> {
    /// Wrap `reader`, requesting at most `chunk_size` bytes per chunk (minimum 1).
    pub fn new(reader: R, chunk_size: usize) -> Self {
        Self {
            reader,
            chunk_size: chunk_size.max(1),
            done: false,
        }
    }
}

impl<R: Read> Iterator for ChunkReader<R> {
    type Item = Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut buf = vec![0u8; self.chunk_size];
        loop {
            match self.reader.read(&mut buf) {
                Ok(0) => {
                    self.done = true;
                    return None;
                }
                Ok(n) => {
                    buf.truncate(n);
                    return Some(Ok(buf));
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

impl<R: Read> std::iter::FusedIterator for ChunkReader<R> {}
