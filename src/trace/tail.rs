use std::collections::VecDeque;

use crate::foundation::core::Vector;

/// One recorded marker position plus the position it was drawn from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TailEntry {
    /// Sampled marker position.
    pub at: Vector,
    /// Previous marker position; `None` on the very first tick of a trace.
    pub from: Option<Vector>,
}

/// Fixed-capacity, most-recent-first history of tail entries.
///
/// Pushing onto a full ring evicts the oldest entry.
#[derive(Clone, Debug)]
pub struct TailRing {
    entries: VecDeque<TailEntry>,
    capacity: usize,
}

impl TailRing {
    /// Create an empty ring. A zero capacity is bumped to one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Maximum number of retained entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when nothing has been pushed yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert at the front, evicting from the back once full.
    pub fn push(&mut self, entry: TailEntry) {
        if self.entries.len() == self.capacity {
            self.entries.pop_back();
        }
        self.entries.push_front(entry);
    }

    /// Most recently pushed entry.
    pub fn newest(&self) -> Option<&TailEntry> {
        self.entries.front()
    }

    /// Entries ordered newest first (index 0 is the latest push).
    pub fn iter_newest_first(&self) -> impl ExactSizeIterator<Item = &TailEntry> + '_ {
        self.entries.iter()
    }

    /// Drop every entry, keeping the capacity.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/trace/tail.rs"]
mod tests;
