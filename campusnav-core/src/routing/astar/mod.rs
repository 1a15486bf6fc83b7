//! A* shortest walking paths over the corridor graph

mod frontier;
mod state;

use fixedbitset::FixedBitSet;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

pub use frontier::{Frontier, HeapFrontier, SortedFrontier};

use crate::{CorridorGraph, Error, Meters, NodeId, geometry::haversine};

/// Bounds on a single search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchLimits {
    /// Maximum number of nodes finalized before the search gives up.
    /// `None` searches until the frontier is exhausted.
    pub max_expansions: Option<usize>,
}

impl SearchLimits {
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn with_max_expansions(max_expansions: usize) -> Self {
        Self {
            max_expansions: Some(max_expansions),
        }
    }
}

/// Minimum-distance path from `start` to `goal`, both ends included.
///
/// Returns `Ok(None)` when the two nodes are in different components.
///
/// # Errors
///
/// [`Error::EmptyGraph`] for a graph without nodes and
/// [`Error::InvalidNodeIndex`] when either node is not part of the graph.
pub fn find_path(
    graph: &CorridorGraph,
    start: NodeId,
    goal: NodeId,
) -> Result<Option<Vec<NodeId>>, Error> {
    find_path_with::<HeapFrontier>(graph, start, goal, &SearchLimits::default())
}

/// A* with a chosen frontier and search limits.
///
/// The frontier only affects performance. A search that stays within
/// `limits` returns the same path as an unlimited one.
///
/// # Errors
///
/// As [`find_path`], plus [`Error::SearchBudgetExhausted`] when more than
/// `limits.max_expansions` nodes would be finalized.
pub fn find_path_with<F: Frontier>(
    graph: &CorridorGraph,
    start: NodeId,
    goal: NodeId,
    limits: &SearchLimits,
) -> Result<Option<Vec<NodeId>>, Error> {
    graph.ensure_not_empty()?;
    graph.validate_node(start)?;
    graph.validate_node(goal)?;

    if start == goal {
        return Ok(Some(vec![start]));
    }

    let node_count = graph.node_count();
    let goal_point = graph.graph[goal].geometry;
    let heuristic = |node: NodeId| haversine(graph.graph[node].geometry, goal_point);

    let mut g_score: Vec<Meters> = vec![f64::INFINITY; node_count];
    let mut predecessors: Vec<Option<NodeId>> = vec![None; node_count];
    let mut finalized = FixedBitSet::with_capacity(node_count);
    let mut frontier = F::default();
    let mut expansions = 0usize;

    g_score[start.index()] = 0.0;
    frontier.push(start, heuristic(start));

    while let Some(current) = frontier.pop() {
        if current == goal {
            return Ok(Some(reconstruct_path(&predecessors, start, goal)));
        }

        // Stale entry left behind by a later improvement
        if finalized.put(current.index()) {
            continue;
        }

        expansions += 1;
        if let Some(max) = limits.max_expansions
            && expansions > max
        {
            warn!("A* gave up after {max} expansions ({start:?} -> {goal:?})");
            return Err(Error::SearchBudgetExhausted { expansions: max });
        }

        let current_g = g_score[current.index()];
        for (neighbor, weight) in graph.neighbors(current) {
            if finalized.contains(neighbor.index()) {
                continue;
            }

            let tentative_g = current_g + weight;
            if tentative_g < g_score[neighbor.index()] {
                g_score[neighbor.index()] = tentative_g;
                predecessors[neighbor.index()] = Some(current);
                frontier.push(neighbor, tentative_g + heuristic(neighbor));
            }
        }
    }

    debug!("No path between {start:?} and {goal:?} after {expansions} expansions");
    Ok(None)
}

fn reconstruct_path(predecessors: &[Option<NodeId>], start: NodeId, goal: NodeId) -> Vec<NodeId> {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        match predecessors[current.index()] {
            Some(prev) => {
                path.push(prev);
                current = prev;
            }
            None => break,
        }
    }
    path.reverse();
    path
}
