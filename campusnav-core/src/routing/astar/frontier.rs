//! Priority queues for the A* open set

use std::collections::BinaryHeap;

use super::state::State;
use crate::{Meters, NodeId};

/// Open set of discovered, not yet finalized nodes.
///
/// `pop` returns the entry with the smallest estimate; entries with equal
/// estimates come out in push order. Stale duplicates are allowed and are
/// filtered by the search loop.
pub trait Frontier: Default {
    fn push(&mut self, node: NodeId, estimate: Meters);

    fn pop(&mut self) -> Option<NodeId>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Binary heap frontier, O(log n) push and pop
#[derive(Debug, Default)]
pub struct HeapFrontier {
    heap: BinaryHeap<State>,
    pushed: u64,
}

impl Frontier for HeapFrontier {
    fn push(&mut self, node: NodeId, estimate: Meters) {
        self.heap.push(State::new(node, estimate, self.pushed));
        self.pushed += 1;
    }

    fn pop(&mut self) -> Option<NodeId> {
        self.heap.pop().map(|state| state.node)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

/// Sorted vector frontier, O(n) push. Only sensible for small graphs.
#[derive(Debug, Default)]
pub struct SortedFrontier {
    // Kept in ascending `State` order, so the best entry is last
    entries: Vec<State>,
    pushed: u64,
}

impl Frontier for SortedFrontier {
    fn push(&mut self, node: NodeId, estimate: Meters) {
        let state = State::new(node, estimate, self.pushed);
        self.pushed += 1;
        let at = self.entries.partition_point(|entry| *entry < state);
        self.entries.insert(at, state);
    }

    fn pop(&mut self) -> Option<NodeId> {
        self.entries.pop().map(|state| state.node)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
