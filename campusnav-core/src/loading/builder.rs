use geo::{LineString, Point};
use geojson::FeatureCollection;
use hashbrown::{HashMap, HashSet};
use itertools::Itertools;
use log::{info, trace};
use petgraph::graph::DiGraph;
use serde_json::Value as JsonValue;

use super::config::GraphConfig;
use super::features::{lines_from_collection, lines_from_json};
use crate::{
    NodeId,
    geometry::{RTreeIndex, SpatialIndex, haversine},
    model::{BuildStats, CorridorEdge, CorridorGraph, CorridorNode, NodeKey},
};

/// Builds the walking graph from a typed `GeoJSON` feature collection.
///
/// Only line geometries contribute edges. Features with missing, empty or
/// non-line geometry are skipped, so partially broken input yields a smaller
/// graph instead of an error.
pub fn build_graph(collection: &FeatureCollection, config: &GraphConfig) -> CorridorGraph {
    build_graph_with_index::<RTreeIndex>(collection, config)
}

/// Same as [`build_graph`], with an explicit spatial index for snapping.
///
/// The choice of index never changes the resulting graph.
pub fn build_graph_with_index<I>(
    collection: &FeatureCollection,
    config: &GraphConfig,
) -> CorridorGraph
where
    I: SpatialIndex + Default,
{
    let mut stats = BuildStats::default();
    let lines = lines_from_collection(collection, &mut stats);
    assemble::<I>(&lines, config, stats)
}

/// Builds the walking graph from loosely-typed `GeoJSON`.
///
/// Every feature is parsed separately; see [`build_graph`] for the
/// skipping rules.
pub fn build_graph_from_json(value: &JsonValue, config: &GraphConfig) -> CorridorGraph {
    let mut stats = BuildStats::default();
    let lines = lines_from_json(value, &mut stats);
    assemble::<RTreeIndex>(&lines, config, stats)
}

/// Builds the walking graph from `geo` line strings (`x` = lng, `y` = lat)
pub fn build_graph_from_lines(lines: &[LineString<f64>], config: &GraphConfig) -> CorridorGraph {
    let stats = BuildStats {
        lines: lines.iter().filter(|line| line.0.len() >= 2).count(),
        ..BuildStats::default()
    };
    assemble::<RTreeIndex>(lines, config, stats)
}

fn assemble<I>(lines: &[LineString<f64>], config: &GraphConfig, stats: BuildStats) -> CorridorGraph
where
    I: SpatialIndex + Default,
{
    let mut assembler = GraphAssembler::<I>::new(*config, stats);
    for line in lines {
        assembler.add_line(line);
    }
    assembler.finish()
}

/// Incremental state of one build
struct GraphAssembler<I> {
    config: GraphConfig,
    graph: DiGraph<CorridorNode, CorridorEdge>,
    /// Every rounded key seen so far, including keys merged into another node
    resolved: HashMap<NodeKey, NodeId>,
    /// Positions of kept representatives
    index: I,
    /// Segments in first-seen order, both ends already snapped
    segments: Vec<(NodeId, NodeId)>,
    seen_segments: HashSet<(NodeId, NodeId)>,
    stats: BuildStats,
}

impl<I: SpatialIndex + Default> GraphAssembler<I> {
    fn new(config: GraphConfig, stats: BuildStats) -> Self {
        Self {
            config,
            graph: DiGraph::new(),
            resolved: HashMap::new(),
            index: I::default(),
            segments: Vec::new(),
            seen_segments: HashSet::new(),
            stats,
        }
    }

    fn add_line(&mut self, line: &LineString<f64>) {
        let precision = self.config.coordinate_precision();

        for (start, end) in line.coords().tuple_windows() {
            let start_key = NodeKey::from_coords(start.y, start.x, precision);
            let end_key = NodeKey::from_coords(end.y, end.x, precision);
            let (Some(start_key), Some(end_key)) = (start_key, end_key) else {
                self.stats.invalid_segments += 1;
                continue;
            };

            let from = self.resolve(start_key, Point::from(*start));
            let to = self.resolve(end_key, Point::from(*end));
            self.add_segment(from, to);
        }
    }

    /// Maps a vertex to its node: by rounded key first, then by snapping to
    /// the closest kept node within the threshold, otherwise a new node.
    fn resolve(&mut self, key: NodeKey, point: Point<f64>) -> NodeId {
        if let Some(&node) = self.resolved.get(&key) {
            return node;
        }

        let threshold = self.config.snap_threshold_m();
        if threshold > 0.0
            && let Some((node, distance)) = self.index.nearest_within(point, threshold)
        {
            trace!("Snapping {key} onto {} ({distance:.3} m)", self.graph[node].key);
            self.stats.snapped_vertices += 1;
            self.resolved.insert(key, node);
            return node;
        }

        let node = self.graph.add_node(CorridorNode {
            key,
            geometry: point,
        });
        self.index.insert(node, point);
        self.resolved.insert(key, node);
        node
    }

    fn add_segment(&mut self, from: NodeId, to: NodeId) {
        if from == to {
            self.stats.self_loops += 1;
            return;
        }

        let pair = if from < to { (from, to) } else { (to, from) };
        if self.seen_segments.insert(pair) {
            self.segments.push((from, to));
        } else {
            self.stats.duplicate_segments += 1;
        }
    }

    fn finish(mut self) -> CorridorGraph {
        // Weights come from the representatives' final positions
        for &(from, to) in &self.segments {
            let weight = haversine(self.graph[from].geometry, self.graph[to].geometry);
            self.graph.add_edge(from, to, CorridorEdge { weight });
            self.graph.add_edge(to, from, CorridorEdge { weight });
        }

        info!(
            "Built corridor graph: {} nodes, {} segments from {} lines \
            ({} vertices snapped, {} features skipped)",
            self.graph.node_count(),
            self.segments.len(),
            self.stats.lines,
            self.stats.snapped_vertices,
            self.stats.skipped_features,
        );

        CorridorGraph::from_parts(self.graph, self.resolved, self.stats)
    }
}
