use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt::Debug;

/// Min-priority queue over `(priority, item)` pairs without decrease-key.
///
/// An item may be pushed several times with different priorities; callers
/// discard the outdated entries when they pop them.
#[derive(Debug)]
pub struct MinQueue<V, P>
where
    V: Copy + Ord + Debug,
    P: Copy + Ord + Debug,
{
    heap: BinaryHeap<Reverse<(P, V)>>,
    pushes: usize,
}

impl<V, P> Default for MinQueue<V, P>
where
    V: Copy + Ord + Debug,
    P: Copy + Ord + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V, P> MinQueue<V, P>
where
    V: Copy + Ord + Debug,
    P: Copy + Ord + Debug,
{
    pub fn new() -> Self {
        MinQueue {
            heap: BinaryHeap::new(),
            pushes: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        MinQueue {
            heap: BinaryHeap::with_capacity(capacity),
            pushes: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of entries currently queued, stale ones included
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Total number of pushes since construction
    pub fn pushes(&self) -> usize {
        self.pushes
    }

    pub fn push(&mut self, item: V, priority: P) {
        self.pushes += 1;
        self.heap.push(Reverse((priority, item)));
    }

    /// Removes the entry with the smallest priority
    pub fn pop(&mut self) -> Option<(V, P)> {
        self.heap.pop().map(|Reverse((priority, item))| (item, priority))
    }
}
