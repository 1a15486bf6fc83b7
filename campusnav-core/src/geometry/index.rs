use std::fmt;

use geo::Point;
use rstar::{AABB, RTree, primitives::GeomWithData};

use super::distance::{haversine, meters_to_degrees};
use crate::{Meters, NodeId};

/// Point lookup used for snapping vertices and resolving query coordinates.
///
/// Implementations must agree on results: the node with the smallest
/// haversine distance wins, and equal distances go to the lowest `NodeId`.
/// Callers insert nodes in ascending id order.
pub trait SpatialIndex {
    fn insert(&mut self, node: NodeId, point: Point<f64>);

    /// Closest node at a distance of at most `max_distance` meters
    fn nearest_within(&self, point: Point<f64>, max_distance: Meters) -> Option<(NodeId, Meters)>;

    /// Closest node overall, `None` only when the index is empty
    fn nearest(&self, point: Point<f64>) -> Option<(NodeId, Meters)>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Keeps the closer of two candidates, lowest id on ties
fn closer(
    best: Option<(NodeId, Meters)>,
    node: NodeId,
    distance: Meters,
) -> Option<(NodeId, Meters)> {
    match best {
        Some((best_node, best_distance))
            if best_distance < distance || (best_distance == distance && best_node < node) =>
        {
            best
        }
        _ => Some((node, distance)),
    }
}

/// Brute-force scan over every inserted node. O(n) per query.
#[derive(Debug, Clone, Default)]
pub struct LinearIndex {
    points: Vec<(NodeId, Point<f64>)>,
}

impl SpatialIndex for LinearIndex {
    fn insert(&mut self, node: NodeId, point: Point<f64>) {
        self.points.push((node, point));
    }

    fn nearest_within(&self, point: Point<f64>, max_distance: Meters) -> Option<(NodeId, Meters)> {
        self.points
            .iter()
            .map(|&(node, candidate)| (node, haversine(point, candidate)))
            .filter(|&(_, distance)| distance <= max_distance)
            .fold(None, |best, (node, distance)| closer(best, node, distance))
    }

    fn nearest(&self, point: Point<f64>) -> Option<(NodeId, Meters)> {
        self.nearest_within(point, f64::INFINITY)
    }

    fn len(&self) -> usize {
        self.points.len()
    }
}

type IndexedPoint = GeomWithData<[f64; 2], NodeId>;

/// R-tree over `[lng, lat]` pairs.
///
/// The tree works in planar degrees, so it only narrows the candidate set;
/// the final pick is always made on haversine distance. Coordinates are
/// expected within `[-180, 180]` longitude.
#[derive(Clone)]
pub struct RTreeIndex {
    tree: RTree<IndexedPoint>,
}

impl fmt::Debug for RTreeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RTreeIndex")
            .field("size", &self.tree.size())
            .finish()
    }
}

impl Default for RTreeIndex {
    fn default() -> Self {
        Self { tree: RTree::new() }
    }
}

impl RTreeIndex {
    /// Bulk-loads an index from `(node, point)` pairs
    pub fn from_points(points: impl IntoIterator<Item = (NodeId, Point<f64>)>) -> Self {
        let entries = points
            .into_iter()
            .map(|(node, point)| GeomWithData::new([point.x(), point.y()], node))
            .collect();
        Self {
            tree: RTree::bulk_load(entries),
        }
    }
}

impl SpatialIndex for RTreeIndex {
    fn insert(&mut self, node: NodeId, point: Point<f64>) {
        self.tree.insert(GeomWithData::new([point.x(), point.y()], node));
    }

    fn nearest_within(&self, point: Point<f64>, max_distance: Meters) -> Option<(NodeId, Meters)> {
        let pick = |best: Option<(NodeId, Meters)>, entry: &IndexedPoint| {
            let [lng, lat] = *entry.geom();
            let distance = haversine(point, Point::new(lng, lat));
            if distance <= max_distance {
                closer(best, entry.data, distance)
            } else {
                best
            }
        };

        let (d_lng, d_lat) = meters_to_degrees(point, max_distance);
        if d_lng >= 180.0 {
            return self.tree.iter().fold(None, pick);
        }

        let (lat_min, lat_max) = (point.y() - d_lat, point.y() + d_lat);
        let (lng_min, lng_max) = (point.x() - d_lng, point.x() + d_lng);
        let mut envelopes = vec![AABB::from_corners([lng_min, lat_min], [lng_max, lat_max])];

        // Boxes crossing the antimeridian are repeated on the far side
        if lng_min < -180.0 {
            envelopes.push(AABB::from_corners(
                [lng_min + 360.0, lat_min],
                [lng_max + 360.0, lat_max],
            ));
        }
        if lng_max > 180.0 {
            envelopes.push(AABB::from_corners(
                [lng_min - 360.0, lat_min],
                [lng_max - 360.0, lat_max],
            ));
        }

        envelopes
            .iter()
            .flat_map(|envelope| self.tree.locate_in_envelope(envelope))
            .fold(None, pick)
    }

    fn nearest(&self, point: Point<f64>) -> Option<(NodeId, Meters)> {
        let candidate = self.tree.nearest_neighbor(&[point.x(), point.y()])?;
        let [lng, lat] = *candidate.geom();
        let radius = haversine(point, Point::new(lng, lat));

        // The planar nearest neighbour bounds the search; anything closer on
        // the sphere, including across the antimeridian, lies inside that radius.
        self.nearest_within(point, radius).or(Some((candidate.data, radius)))
    }

    fn len(&self) -> usize {
        self.tree.size()
    }
}
