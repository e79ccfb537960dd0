//! Append-only store of merged thread blocks

use super::{error::Result, sink::Sink};
use parking_lot::Mutex;

/// Ordered sequence of thread blocks
///
/// Each entry is one thread's complete buffer at the moment it merged, so the
/// entry order follows thread-exit order rather than log-call order. Flushing
/// reads the store without clearing it.
#[derive(Debug, Default)]
pub struct LogStore {
    blocks: Mutex<Vec<String>>,
}

impl LogStore {
    pub const fn new() -> Self {
        Self {
            blocks: Mutex::new(Vec::new()),
        }
    }

    /// Move one thread block into the store, returning its position
    pub fn merge(&self, block: String) -> usize {
        let mut blocks = self.blocks.lock();
        blocks.push(block);
        blocks.len() - 1
    }

    pub fn len(&self) -> usize {
        self.blocks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.lock().is_empty()
    }

    /// Copy of the current blocks, in store order
    pub fn snapshot(&self) -> Vec<String> {
        self.blocks.lock().clone()
    }

    /// Write every block verbatim to `sink`, returning the byte count
    pub fn write_to(&self, sink: &mut dyn Sink) -> Result<u64> {
        let blocks = self.blocks.lock();
        let mut written = 0u64;
        for block in blocks.iter() {
            sink.write_text(block)?;
            written += block.len() as u64;
        }
        sink.flush()?;
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::MemorySink;

    #[test]
    fn test_merge_keeps_insertion_order() {
        let store = LogStore::new();
        assert_eq!(store.merge("first".to_string()), 0);
        assert_eq!(store.merge(String::new()), 1);
        assert_eq!(store.merge("third".to_string()), 2);
        assert_eq!(store.snapshot(), vec!["first", "", "third"]);
    }

    #[test]
    fn test_write_to_is_verbatim_and_keeps_blocks() {
        let store = LogStore::new();
        store.merge("a\n".to_string());
        store.merge("bc".to_string());

        let mut sink = MemorySink::new();
        let written = store.write_to(&mut sink).expect("write");
        assert_eq!(written, 4);
        assert_eq!(sink.contents(), "a\nbc");
        assert_eq!(store.len(), 2);
    }
}
