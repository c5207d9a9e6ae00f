//! In-memory sink factory for callers that want the documents as bytes.

use super::SinkFactory;
use std::cell::RefCell;
use std::io;
use std::rc::Rc;

/// Factory producing `Vec<u8>` buffers.
///
/// Clones share the record of discarded identifiers, so a caller can keep a
/// clone to inspect what a failed run threw away.
#[derive(Debug, Clone, Default)]
pub struct MemorySinkFactory {
    discarded: Rc<RefCell<Vec<String>>>,
}

impl MemorySinkFactory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Identifiers discarded so far, in discard order.
    #[must_use]
    pub fn discarded(&self) -> Vec<String> {
        self.discarded.borrow().clone()
    }
}

impl SinkFactory for MemorySinkFactory {
    type Writer = Vec<u8>;

    fn create(&mut self, _identifier: &str) -> io::Result<Vec<u8>> {
        Ok(Vec::new())
    }

    fn discard(&mut self, identifier: &str) -> io::Result<()> {
        self.discarded.borrow_mut().push(identifier.to_string());
        Ok(())
    }
}
