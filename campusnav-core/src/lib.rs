//! Walking-route engine for campus corridor networks.
//!
//! Corridor geometry (`LineString` / `MultiLineString` features) is turned
//! into a weighted, bidirectional graph with near-coincident vertices snapped
//! together. Routes are found with A* over great-circle distances and handed
//! back as `GeoJSON` features for the map layer.

pub mod error;
pub mod geometry;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;

pub use error::Error;
pub use loading::{GraphConfig, build_graph, build_graph_from_json, build_graph_from_lines};
pub use model::{CorridorGraph, NodeKey};
pub use routing::{SearchLimits, find_path, nearest_node, path_length, path_to_feature};

/// Index of a node in the corridor graph arena
pub type NodeId = petgraph::graph::NodeIndex;

/// Distances and edge weights, in meters
pub type Meters = f64;

/// Mean Earth radius used by every distance computation
pub const EARTH_RADIUS_M: Meters = 6_371_000.0;

/// Snapping radius applied when no configuration is given
pub const DEFAULT_SNAP_THRESHOLD_M: Meters = 2.0;

/// Decimal places kept when keying nodes by coordinates (about 0.1 m)
pub const DEFAULT_COORDINATE_PRECISION: u32 = 6;

/// Value of the `layer` property on computed route features
pub const ROUTE_LAYER: &str = "route";
