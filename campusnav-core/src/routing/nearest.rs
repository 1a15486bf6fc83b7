use geo::Point;
use itertools::Itertools;

use crate::{CorridorGraph, Error, Meters, NodeId, geometry::SpatialIndex};

/// Graph node closest to a query coordinate.
///
/// Equal distances resolve to the lowest node id, i.e. the node created
/// first during the build.
///
/// # Errors
///
/// [`Error::EmptyGraph`] when the graph has no nodes and
/// [`Error::InvalidCoordinate`] for non-finite input.
pub fn nearest_node(graph: &CorridorGraph, lat: f64, lng: f64) -> Result<NodeId, Error> {
    nearest_node_with_distance(graph, lat, lng).map(|(node, _)| node)
}

/// Like [`nearest_node`], also returning the distance to the node in meters
///
/// # Errors
///
/// See [`nearest_node`].
pub fn nearest_node_with_distance(
    graph: &CorridorGraph,
    lat: f64,
    lng: f64,
) -> Result<(NodeId, Meters), Error> {
    graph.ensure_not_empty()?;
    if !lat.is_finite() || !lng.is_finite() {
        return Err(Error::InvalidCoordinate { lat, lng });
    }

    graph
        .spatial_index()
        .nearest(Point::new(lng, lat))
        .ok_or(Error::EmptyGraph)
}

/// Sum of edge weights along `path`
///
/// # Errors
///
/// [`Error::EmptyPath`] for an empty path, [`Error::InvalidNodeIndex`] for a
/// node outside the graph and [`Error::MissingEdge`] when two consecutive
/// nodes are not adjacent.
pub fn path_length(graph: &CorridorGraph, path: &[NodeId]) -> Result<Meters, Error> {
    if path.is_empty() {
        return Err(Error::EmptyPath);
    }
    for &node in path {
        graph.validate_node(node)?;
    }

    path.iter()
        .tuple_windows()
        .map(|(&from, &to)| {
            graph.edge_weight(from, to).ok_or(Error::MissingEdge {
                from: from.index(),
                to: to.index(),
            })
        })
        .sum()
}
