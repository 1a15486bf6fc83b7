//! Pathfinding over the corridor graph and conversion of results for the
//! map layer.

pub mod astar;
mod nearest;
mod to_geojson;

pub use astar::{Frontier, HeapFrontier, SearchLimits, SortedFrontier, find_path, find_path_with};
pub use nearest::{nearest_node, nearest_node_with_distance, path_length};
pub use to_geojson::path_to_feature;
