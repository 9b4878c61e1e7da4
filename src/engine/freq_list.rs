use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// One pending subtree, keyed by weight then insertion order
#[derive(Debug, Clone, Copy)]
struct Entry<T> {
    weight: u64,
    seq: u64,
    item: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.seq == other.seq
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse for min-heap; earlier insertion wins ties
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Items ordered by ascending weight.
///
/// Equal weights come out in the order they went in, which makes the merge
/// order of tree construction (and so the encoded output) deterministic.
#[derive(Debug)]
pub struct FrequencyList<T> {
    heap: BinaryHeap<Entry<T>>,
    next_seq: u64,
}

impl<T> FrequencyList<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            next_seq: 0,
        }
    }

    pub fn insert(&mut self, item: T, weight: u64) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry { weight, seq, item });
    }

    /// Detaches the lightest item together with its weight.
    pub fn remove_min(&mut self) -> Option<(T, u64)> {
        self.heap.pop().map(|entry| (entry.item, entry.weight))
    }

    pub fn has_exactly_one(&self) -> bool {
        self.heap.len() == 1
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl<T> Default for FrequencyList<T> {
    fn default() -> Self {
        Self::new()
    }
}
