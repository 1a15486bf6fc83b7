//! Walkable corridor network

pub mod components;
pub mod network;

pub use components::{CorridorEdge, CorridorNode, NodeKey};
pub use network::{BuildStats, CorridorGraph};
