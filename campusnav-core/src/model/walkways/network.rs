//! Corridor graph: arena of nodes plus bidirectional weighted edges

use hashbrown::HashMap;
use petgraph::{graph::DiGraph, visit::EdgeRef};

use super::components::{CorridorEdge, CorridorNode, NodeKey};
use crate::{
    Error, Meters, NodeId,
    geometry::{RTreeIndex, SpatialIndex},
};

/// Counters collected while building a graph
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Line geometries that contributed at least one segment
    pub lines: usize,
    /// Features skipped for missing, malformed or non-line geometry
    pub skipped_features: usize,
    /// Distinct rounded vertices merged into a nearby representative
    pub snapped_vertices: usize,
    /// Segments whose ends collapsed onto one node
    pub self_loops: usize,
    /// Segments already present between the same pair of nodes
    pub duplicate_segments: usize,
    /// Segments with a non-finite coordinate
    pub invalid_segments: usize,
}

/// Immutable walking graph.
///
/// Every corridor segment is stored as two directed edges with equal weight.
/// Nodes live in a `petgraph` arena addressed by [`NodeId`]; the
/// `NodeKey -> NodeId` table and the R-tree are built once after snapping.
#[derive(Debug, Clone)]
pub struct CorridorGraph {
    pub(crate) graph: DiGraph<CorridorNode, CorridorEdge>,
    lookup: HashMap<NodeKey, NodeId>,
    rtree: RTreeIndex,
    stats: BuildStats,
}

impl Default for CorridorGraph {
    fn default() -> Self {
        Self {
            graph: DiGraph::new(),
            lookup: HashMap::new(),
            rtree: RTreeIndex::default(),
            stats: BuildStats::default(),
        }
    }
}

impl CorridorGraph {
    pub(crate) fn from_parts(
        graph: DiGraph<CorridorNode, CorridorEdge>,
        lookup: HashMap<NodeKey, NodeId>,
        stats: BuildStats,
    ) -> Self {
        let rtree =
            RTreeIndex::from_points(graph.node_indices().map(|idx| (idx, graph[idx].geometry)));

        Self {
            graph,
            lookup,
            rtree,
            stats,
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of directed edges, twice the number of corridor segments
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn node(&self, node: NodeId) -> Option<&CorridorNode> {
        self.graph.node_weight(node)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &CorridorNode)> {
        self.graph
            .node_indices()
            .map(move |idx| (idx, &self.graph[idx]))
    }

    /// Resolves a rounded-coordinate key to its node, including keys that
    /// were snapped onto a neighbouring node during the build
    pub fn node_by_key(&self, key: &NodeKey) -> Option<NodeId> {
        self.lookup.get(key).copied()
    }

    /// Outgoing edges of `node` as `(neighbor, weight)` pairs
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = (NodeId, Meters)> + '_ {
        self.graph
            .edges(node)
            .map(|edge| (edge.target(), edge.weight().weight))
    }

    /// Weight of the directed edge `from -> to`, if it exists
    pub fn edge_weight(&self, from: NodeId, to: NodeId) -> Option<Meters> {
        self.graph
            .find_edge(from, to)
            .and_then(|edge| self.graph.edge_weight(edge))
            .map(|edge| edge.weight)
    }

    /// Every directed edge as `(from, to, weight)`
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId, Meters)> + '_ {
        self.graph
            .edge_references()
            .map(|edge| (edge.source(), edge.target(), edge.weight().weight))
    }

    pub fn spatial_index(&self) -> &RTreeIndex {
        &self.rtree
    }

    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    /// Checks that `node` belongs to this graph
    pub(crate) fn validate_node(&self, node: NodeId) -> Result<(), Error> {
        if node.index() < self.graph.node_count() {
            Ok(())
        } else {
            Err(Error::InvalidNodeIndex(node.index()))
        }
    }

    pub(crate) fn ensure_not_empty(&self) -> Result<(), Error> {
        if self.is_empty() {
            Err(Error::EmptyGraph)
        } else {
            debug_assert_eq!(self.rtree.len(), self.node_count());
            Ok(())
        }
    }
}
