use petgraph::graph::NodeIndex;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Debug, Clone, Copy)]
struct Entry {
    f: f64,
    seq: u64,
    vertex: NodeIndex,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    // `BinaryHeap` is a max-heap: flip both keys so the smallest `f` and,
    // among equal `f`, the earliest insertion is on top.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Open set of a search, ordered by estimated total cost.
///
/// A vertex whose priority improves is simply inserted again; the outdated
/// entry stays in the heap and is recognised as stale by the caller when it
/// is extracted.
#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<Entry>,
    seq: u64,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Frontier {
            heap: BinaryHeap::with_capacity(capacity),
            seq: 0,
        }
    }

    pub fn insert(&mut self, vertex: NodeIndex, f: f64) {
        self.heap.push(Entry {
            f,
            seq: self.seq,
            vertex,
        });
        self.seq += 1;
    }

    /// Remove the entry with the smallest `f`, ties going to the earliest
    /// insertion.
    pub fn extract_min(&mut self) -> Option<(NodeIndex, f64)> {
        self.heap.pop().map(|entry| (entry.vertex, entry.f))
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
