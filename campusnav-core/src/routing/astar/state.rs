use std::cmp::Ordering;

use crate::{Meters, NodeId};

/// Total order over `f64` scores
#[derive(Copy, Clone, Debug, Default)]
pub(super) struct FloatOrd(pub(super) f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Frontier entry: a node and its `f = g + h` estimate at push time.
///
/// `seq` is the push counter; among equal estimates the earliest push wins.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(super) struct State {
    pub(super) estimate: FloatOrd,
    pub(super) seq: u64,
    pub(super) node: NodeId,
}

impl State {
    pub(super) fn new(node: NodeId, estimate: Meters, seq: u64) -> Self {
        Self {
            estimate: FloatOrd(estimate),
            seq,
            node,
        }
    }
}

// Implement Ord for State to use in BinaryHeap
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap by estimate, then by insertion order
        other
            .estimate
            .cmp(&self.estimate)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
