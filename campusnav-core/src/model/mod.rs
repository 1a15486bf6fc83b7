//! Data model for corridor routing
//!
//! Contains the node, edge and graph types the builder produces and the
//! pathfinder consumes.

pub mod walkways;

pub use walkways::{BuildStats, CorridorEdge, CorridorGraph, CorridorNode, NodeKey};
