use geo::{Coord, LineString};
use geojson::{Feature, Geometry, GeometryValue, JsonObject};
use serde_json::json;

use crate::{CorridorGraph, Error, NodeId, ROUTE_LAYER};

/// Converts a node path into a route `Feature` for the map layer.
///
/// The geometry is a `LineString` with one `[lng, lat]` position per path
/// node, in path order. A single-node path gives a one-position line, which
/// means the walker is already at the destination.
///
/// # Errors
///
/// [`Error::EmptyPath`] for an empty path and [`Error::InvalidNodeIndex`]
/// for nodes outside the graph.
pub fn path_to_feature(graph: &CorridorGraph, path: &[NodeId]) -> Result<Feature, Error> {
    if path.is_empty() {
        return Err(Error::EmptyPath);
    }

    let coords = path
        .iter()
        .map(|&node| {
            graph
                .node(node)
                .map(|node| Coord::from(node.geometry))
                .ok_or(Error::InvalidNodeIndex(node.index()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let geometry = Geometry::new(GeometryValue::from(&LineString::new(coords)));

    let mut properties = JsonObject::new();
    properties.insert("layer".to_string(), json!(ROUTE_LAYER));

    Ok(Feature {
        geometry: Some(geometry),
        properties: Some(properties),
        ..Default::default()
    })
}
