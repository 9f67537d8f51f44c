//! Bounded undo stack of full document snapshots.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use std::collections::VecDeque;

use crate::consts::MAX_UNDO;
use crate::doc::Document;

/// Snapshots taken immediately before each mutation, oldest first.
///
/// Once `capacity` is reached the oldest snapshot is evicted.
#[derive(Debug, Clone)]
pub struct History {
    undo_stack: VecDeque<Document>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::with_capacity(MAX_UNDO)
    }
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { undo_stack: VecDeque::with_capacity(capacity), capacity }
    }

    /// Save a structural copy of `doc` before it is mutated.
    pub fn save_state(&mut self, doc: &Document) {
        if self.capacity == 0 {
            return;
        }
        if self.undo_stack.len() == self.capacity {
            self.undo_stack.pop_front();
        }
        self.undo_stack.push_back(doc.clone());
    }

    /// Pop the most recent snapshot.
    pub fn undo(&mut self) -> Option<Document> {
        self.undo_stack.pop_back()
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    #[must_use]
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
    }
}
