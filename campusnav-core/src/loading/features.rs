//! Extraction of line geometries from `GeoJSON` input
//!
//! Only `LineString` and `MultiLineString` geometries (also when nested in a
//! `GeometryCollection`) are kept. Anything else, including features whose
//! geometry is missing or fails to parse, is skipped and counted.

use geo::{Coord, LineString};
use geojson::{FeatureCollection, GeometryValue, Position};
use log::debug;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::model::BuildStats;

/// Collects the lines of every feature in a typed collection
pub(crate) fn lines_from_collection(
    collection: &FeatureCollection,
    stats: &mut BuildStats,
) -> Vec<LineString<f64>> {
    let mut lines = Vec::new();

    for (idx, feature) in collection.features.iter().enumerate() {
        let Some(geometry) = &feature.geometry else {
            debug!("Feature {idx} has no geometry, skipping");
            stats.skipped_features += 1;
            continue;
        };
        push_feature_lines(&geometry.value, idx, &mut lines, stats);
    }

    lines
}

/// Collects lines from loosely-typed JSON.
///
/// Accepts a `FeatureCollection`, a single `Feature` or a bare geometry.
/// Each feature is parsed on its own so one broken entry does not discard
/// the rest of the collection.
pub(crate) fn lines_from_json(value: &JsonValue, stats: &mut BuildStats) -> Vec<LineString<f64>> {
    let mut lines = Vec::new();

    if let Some(features) = value.get("features").and_then(JsonValue::as_array) {
        for (idx, feature) in features.iter().enumerate() {
            push_json_feature(feature, idx, &mut lines, stats);
        }
    } else if value.get("geometry").is_some() {
        push_json_feature(value, 0, &mut lines, stats);
    } else {
        push_json_geometry(value, 0, &mut lines, stats);
    }

    lines
}

fn push_json_feature(
    feature: &JsonValue,
    idx: usize,
    lines: &mut Vec<LineString<f64>>,
    stats: &mut BuildStats,
) {
    match feature.get("geometry") {
        Some(geometry) if !geometry.is_null() => push_json_geometry(geometry, idx, lines, stats),
        _ => {
            debug!("Feature {idx} has no geometry, skipping");
            stats.skipped_features += 1;
        }
    }
}

fn push_json_geometry(
    geometry: &JsonValue,
    idx: usize,
    lines: &mut Vec<LineString<f64>>,
    stats: &mut BuildStats,
) {
    match geojson::Geometry::deserialize(geometry) {
        Ok(geometry) => push_feature_lines(&geometry.value, idx, lines, stats),
        Err(e) => {
            debug!("Feature {idx} has a malformed geometry ({e}), skipping");
            stats.skipped_features += 1;
        }
    }
}

fn push_feature_lines(
    geometry: &GeometryValue,
    idx: usize,
    lines: &mut Vec<LineString<f64>>,
    stats: &mut BuildStats,
) {
    if has_short_position(geometry) {
        debug!("Feature {idx} has a position with fewer than two numbers, skipping");
        stats.skipped_features += 1;
        return;
    }

    let before = lines.len();
    collect_lines(geometry, lines);

    let added = lines.len() - before;
    if added == 0 {
        debug!("Feature {idx} contains no usable line geometry, skipping");
        stats.skipped_features += 1;
    }
    stats.lines += added;
}

/// Any line position lacking a longitude or latitude
fn has_short_position(geometry: &GeometryValue) -> bool {
    fn short(positions: &[Position]) -> bool {
        positions.iter().any(|position| position.len() < 2)
    }

    match geometry {
        GeometryValue::LineString { coordinates } => short(coordinates),
        GeometryValue::MultiLineString { coordinates } => {
            coordinates.iter().any(|line| short(line))
        }
        GeometryValue::GeometryCollection { geometries } => geometries
            .iter()
            .any(|member| has_short_position(&member.value)),
        _ => false,
    }
}

/// Appends every line with at least one segment
fn collect_lines(geometry: &GeometryValue, lines: &mut Vec<LineString<f64>>) {
    match geometry {
        GeometryValue::LineString { coordinates } => push_line(coordinates, lines),
        GeometryValue::MultiLineString { coordinates } => {
            for line in coordinates {
                push_line(line, lines);
            }
        }
        GeometryValue::GeometryCollection { geometries } => {
            for member in geometries {
                collect_lines(&member.value, lines);
            }
        }
        _ => {}
    }
}

fn push_line(positions: &[Position], lines: &mut Vec<LineString<f64>>) {
    if positions.len() < 2 {
        return;
    }
    let coords = positions
        .iter()
        .map(|position| Coord {
            x: position[0],
            y: position[1],
        })
        .collect();
    lines.push(LineString::new(coords));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keeps_line_strings_and_multi_line_strings() {
        let value = json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {},
                    "geometry": { "type": "LineString", "coordinates": [[0.0, 0.0], [0.0, 0.001]] }
                },
                {
                    "type": "Feature",
                    "properties": {},
                    "geometry": {
                        "type": "MultiLineString",
                        "coordinates": [
                            [[1.0, 1.0], [1.0, 1.001]],
                            [[2.0, 2.0], [2.0, 2.001], [2.001, 2.001]]
                        ]
                    }
                }
            ]
        });

        let mut stats = BuildStats::default();
        let lines = lines_from_json(&value, &mut stats);
        assert_eq!(lines.len(), 3);
        assert_eq!(stats.lines, 3);
        assert_eq!(stats.skipped_features, 0);
    }

    #[test]
    fn skips_malformed_and_foreign_geometries() {
        let value = json!({
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "properties": {}, "geometry": null },
                { "type": "Feature", "properties": {}, "geometry": { "type": "LineString" } },
                { "type": "Feature", "properties": {}, "geometry": { "type": "LineString", "coordinates": [] } },
                { "type": "Feature", "properties": {}, "geometry": { "type": "Point", "coordinates": [0.0, 0.0] } },
                { "type": "Feature", "properties": {} },
                {
                    "type": "Feature",
                    "properties": {},
                    "geometry": { "type": "LineString", "coordinates": [[0.0, 0.0], [0.0, 0.001]] }
                }
            ]
        });

        let mut stats = BuildStats::default();
        let lines = lines_from_json(&value, &mut stats);
        assert_eq!(lines.len(), 1);
        assert_eq!(stats.skipped_features, 5);
    }

    #[test]
    fn accepts_single_feature_and_bare_geometry() {
        let feature = json!({
            "type": "Feature",
            "properties": {},
            "geometry": { "type": "LineString", "coordinates": [[0.0, 0.0], [0.0, 0.001]] }
        });
        let geometry = json!({ "type": "LineString", "coordinates": [[0.0, 0.0], [0.0, 0.001]] });

        let mut stats = BuildStats::default();
        assert_eq!(lines_from_json(&feature, &mut stats).len(), 1);
        assert_eq!(lines_from_json(&geometry, &mut stats).len(), 1);
    }

    #[test]
    fn searches_geometry_collections() {
        let value = json!({
            "type": "GeometryCollection",
            "geometries": [
                { "type": "Point", "coordinates": [0.0, 0.0] },
                { "type": "LineString", "coordinates": [[0.0, 0.0], [0.0, 0.001]] }
            ]
        });

        let mut stats = BuildStats::default();
        assert_eq!(lines_from_json(&value, &mut stats).len(), 1);
    }

    #[test]
    fn typed_collection_skips_missing_geometry() {
        let value = json!({
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "properties": {}, "geometry": null },
                {
                    "type": "Feature",
                    "properties": {},
                    "geometry": { "type": "LineString", "coordinates": [[0.0, 0.0], [0.0, 0.001]] }
                }
            ]
        });
        let collection: FeatureCollection = serde_json::from_value(value).unwrap();

        let mut stats = BuildStats::default();
        assert_eq!(lines_from_collection(&collection, &mut stats).len(), 1);
        assert_eq!(stats.skipped_features, 1);
    }

    #[test]
    fn skips_positions_without_latitude() {
        let value = json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {},
                    "geometry": { "type": "LineString", "coordinates": [[1.0], [2.0]] }
                },
                {
                    "type": "Feature",
                    "properties": {},
                    "geometry": {
                        "type": "MultiLineString",
                        "coordinates": [[[1.0, 1.0], [1.0, 1.001]], [[2.0, 2.0], []]]
                    }
                },
                {
                    "type": "Feature",
                    "properties": {},
                    "geometry": { "type": "LineString", "coordinates": [[0.0, 0.0], [0.0, 0.001]] }
                }
            ]
        });

        let mut stats = BuildStats::default();
        let lines = lines_from_json(&value, &mut stats);
        assert_eq!(lines.len(), 1);
        assert_eq!(stats.skipped_features, 2);

        let collection: FeatureCollection = serde_json::from_value(value).unwrap();
        let mut stats = BuildStats::default();
        let lines = lines_from_collection(&collection, &mut stats);
        assert_eq!(lines.len(), 1);
        assert_eq!(stats.skipped_features, 2);
    }

    #[test]
    fn extra_position_values_are_ignored() {
        let value = json!({ "type": "LineString", "coordinates": [[0.0, 0.0, 12.5], [0.0, 0.001, 13.0]] });

        let mut stats = BuildStats::default();
        let lines = lines_from_json(&value, &mut stats);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].0[1], Coord { x: 0.0, y: 0.001 });
    }
}
