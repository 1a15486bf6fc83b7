pub use crate::{DEFAULT_COORDINATE_PRECISION, DEFAULT_SNAP_THRESHOLD_M, ROUTE_LAYER};

// Graph construction
pub use crate::loading::{
    GraphConfig, build_graph, build_graph_from_json, build_graph_from_lines,
    build_graph_with_index,
};
pub use crate::model::{BuildStats, CorridorEdge, CorridorGraph, CorridorNode, NodeKey};

// Distance and spatial lookup
pub use crate::geometry::{LinearIndex, RTreeIndex, SpatialIndex, haversine};

// Routing
pub use crate::routing::{
    Frontier, HeapFrontier, SearchLimits, SortedFrontier, find_path, find_path_with, nearest_node,
    nearest_node_with_distance, path_length, path_to_feature,
};

// Core types
pub use crate::Error;
pub use crate::Meters;
pub use crate::NodeId;
