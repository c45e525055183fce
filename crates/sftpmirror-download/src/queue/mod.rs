//! Work queue of remote paths awaiting classification.
//!
//! Pure synchronous state (no I/O, no tracing). The traversal engine owns
//! the only instance for the lifetime of a job.
//!
//! # Ordering
//!
//! The queue is FIFO: children of a directory are appended at the tail, so
//! all entries at depth `n` are popped before any entry at depth `n + 1`
//! that was discovered through them. Sibling order is whatever order the
//! caller pushes them in (the remote listing order).

use std::collections::VecDeque;

use sftpmirror_core::RemotePath;

/// FIFO queue driving breadth-first traversal.
#[derive(Debug, Default)]
pub struct WorkQueue {
    pending: VecDeque<RemotePath>,
    enqueued_total: u64,
}

impl WorkQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a queue seeded with the top-level entries of the root.
    pub fn seeded(entries: impl IntoIterator<Item = RemotePath>) -> Self {
        let mut queue = Self::new();
        queue.extend(entries);
        queue
    }

    /// Append entries at the tail, preserving their order.
    ///
    /// Returns how many were appended.
    pub fn extend(&mut self, entries: impl IntoIterator<Item = RemotePath>) -> usize {
        let before = self.pending.len();
        self.pending.extend(entries);
        let added = self.pending.len() - before;
        self.enqueued_total += added as u64;
        added
    }

    /// Take the head of the queue.
    pub fn pop(&mut self) -> Option<RemotePath> {
        self.pending.pop_front()
    }

    /// Number of entries still pending.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Check if the queue has drained.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Total number of entries ever queued.
    pub const fn enqueued_total(&self) -> u64 {
        self.enqueued_total
    }
}
