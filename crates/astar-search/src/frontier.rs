//! The open frontier: a min-heap keyed by `(f, seq)`.
//!
//! Lower `f` pops first; ties are broken by insertion order (FIFO) through a
//! strictly increasing sequence number assigned on push.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use astar_core::Point;

/// An entry in the frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entry {
    pub f: i32,
    /// Insertion order; lower was pushed earlier.
    pub seq: u64,
    pub pos: Point,
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Natural order; the heap wraps entries in `Reverse`. `seq` is unique
        // so `pos` never decides.
        self.f
            .cmp(&other.f)
            .then(self.seq.cmp(&other.seq))
            .then(self.pos.cmp(&other.pos))
    }
}

/// Priority queue of discovered cells.
#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<Reverse<Entry>>,
    seq: u64,
}

impl Frontier {
    /// Create an empty frontier. The first push gets sequence number 0.
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            seq: 0,
        }
    }

    /// Push `pos` with priority `f`, returning the sequence number assigned.
    pub fn push(&mut self, pos: Point, f: i32) -> u64 {
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(Reverse(Entry { f, seq, pos }));
        seq
    }

    /// Pop the entry with the lowest `(f, seq)`.
    pub fn pop(&mut self) -> Option<Entry> {
        self.heap.pop().map(|Reverse(e)| e)
    }

    /// The entry that [`pop`](Self::pop) would return.
    pub fn peek(&self) -> Option<&Entry> {
        self.heap.peek().map(|Reverse(e)| e)
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}
