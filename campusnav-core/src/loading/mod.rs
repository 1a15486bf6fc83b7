//! This module is responsible for reading corridor geometry (`GeoJSON`)
//! and building the walking graph from it.

mod builder;
mod config;
mod features;

pub use builder::{
    build_graph, build_graph_from_json, build_graph_from_lines, build_graph_with_index,
};
pub use config::GraphConfig;
