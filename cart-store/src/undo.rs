//! Bounded undo log
//!
//! Holds the most recent destructive mutations, oldest evicted past the
//! capacity. Entries are popped exactly once; replay lives in the store.

use cart_types::UndoEntry;
use std::collections::VecDeque;

/// Default number of entries retained
pub const DEFAULT_UNDO_CAPACITY: usize = 20;

/// Bounded log of reversible mutations
#[derive(Debug)]
pub struct UndoLog {
    entries: VecDeque<UndoEntry>,
    capacity: usize,
}

impl UndoLog {
    pub fn new(capacity: usize) -> Self {
        // A zero capacity would make every push a silent drop
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append an entry, evicting from the oldest end past the cap
    pub fn push(&mut self, entry: UndoEntry) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Remove and return the most recent entry
    pub fn pop(&mut self) -> Option<UndoEntry> {
        self.entries.pop_back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for UndoLog {
    fn default() -> Self {
        Self::new(DEFAULT_UNDO_CAPACITY)
    }
}
