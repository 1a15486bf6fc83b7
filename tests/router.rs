use std::sync::Arc;

use campusnav::prelude::*;
use campusnav::{Router, RouterConfig};
use geo::Point;
use serde_json::json;

/// Two buildings joined by a courtyard path, plus a detached parking lot
fn corridors() -> serde_json::Value {
    json!({
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": { "name": "hall A" },
                "geometry": { "type": "LineString", "coordinates": [[0.0, 0.0], [0.0, 0.0002], [0.0002, 0.0002]] }
            },
            {
                "type": "Feature",
                "properties": { "name": "courtyard" },
                "geometry": { "type": "LineString", "coordinates": [[0.000_201, 0.000_201], [0.0004, 0.0002]] }
            },
            {
                "type": "Feature",
                "properties": { "name": "parking" },
                "geometry": { "type": "LineString", "coordinates": [[0.01, 0.01], [0.01, 0.0102]] }
            },
            {
                "type": "Feature",
                "properties": { "name": "fountain" },
                "geometry": { "type": "Point", "coordinates": [0.0001, 0.0001] }
            }
        ]
    })
}

fn router() -> Router {
    let router = Router::new(&RouterConfig::default()).unwrap();
    router.rebuild_from_json(&corridors());
    router
}

#[test]
fn routes_before_loading_report_empty_graph() {
    let router = Router::new(&RouterConfig::default()).unwrap();
    let result = router.route(Point::new(0.0, 0.0), Point::new(0.0004, 0.0002));
    assert_eq!(result.err(), Some(Error::EmptyGraph));
}

#[test]
fn routes_across_snapped_junction() {
    let router = router();
    let route = router
        .route(Point::new(0.000_01, 0.0), Point::new(0.0004, 0.000_21))
        .unwrap()
        .expect("hall A and courtyard are joined");

    assert_eq!(route.path.len(), 4);
    assert!(!route.is_trivial());
    assert!(route.start_offset_m > 0.0 && route.start_offset_m < 2.0);

    let graph = router.snapshot();
    let expected = path_length(&graph, &route.path).unwrap();
    assert_eq!(route.distance_m, expected);

    let value = serde_json::to_value(&route.feature).unwrap();
    assert_eq!(value["properties"]["layer"], ROUTE_LAYER);
    assert_eq!(value["geometry"]["coordinates"].as_array().unwrap().len(), 4);
}

#[test]
fn disconnected_destination_has_no_route() {
    let router = router();
    let route = router.route(Point::new(0.0, 0.0), Point::new(0.01, 0.0101)).unwrap();
    assert!(route.is_none());
}

#[test]
fn same_point_is_trivial_route() {
    let router = router();
    let route = router
        .route(Point::new(0.0, 0.0002), Point::new(0.0, 0.0002))
        .unwrap()
        .unwrap();

    assert!(route.is_trivial());
    assert_eq!(route.distance_m, 0.0);
}

#[test]
fn rebuild_swaps_snapshot_without_touching_old_one() {
    let router = router();
    let before = router.snapshot();

    let after = router
        .rebuild_from_str(
            r#"{"type":"FeatureCollection","features":[
                {"type":"Feature","properties":{},"geometry":{"type":"LineString","coordinates":[[1.0,1.0],[1.0,1.001]]}}
            ]}"#,
        )
        .unwrap();

    assert_eq!(before.node_count(), 6);
    assert_eq!(before.stats().snapped_vertices, 1);
    assert_eq!(after.node_count(), 2);
    assert!(Arc::ptr_eq(&after, &router.snapshot()));
    assert!(!Arc::ptr_eq(&before, &router.snapshot()));
}

#[test]
fn unparsable_text_keeps_current_graph() {
    let router = router();
    let before = router.snapshot();

    assert!(matches!(
        router.rebuild_from_str("{not json"),
        Err(Error::GeoJsonError(_))
    ));
    assert!(Arc::ptr_eq(&before, &router.snapshot()));
}

#[test]
fn batch_routes_keep_input_order() {
    let router = router();
    let pairs = [
        (Point::new(0.0, 0.0), Point::new(0.0004, 0.0002)),
        (Point::new(0.0, 0.0), Point::new(0.01, 0.0102)),
        (Point::new(0.0002, 0.0002), Point::new(0.0002, 0.0002)),
    ];

    let results = router.route_many(&pairs);
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap().as_ref().unwrap().path.len(), 4);
    assert!(results[1].as_ref().unwrap().is_none());
    assert!(results[2].as_ref().unwrap().as_ref().unwrap().is_trivial());

    for ((from, to), result) in pairs.iter().zip(&results) {
        let single = router.route(*from, *to).unwrap();
        let batched = result.as_ref().unwrap();
        assert_eq!(single.map(|r| r.path), batched.as_ref().map(|r| r.path.clone()));
    }
}

#[test]
fn expansion_budget_is_enforced() {
    let config = RouterConfig::from_toml_str("max_expansions = 1").unwrap();
    let router = Router::new(&config).unwrap();
    router.rebuild_from_json(&corridors());

    let result = router.route(Point::new(0.0, 0.0), Point::new(0.0004, 0.0002));
    assert_eq!(
        result.err(),
        Some(Error::SearchBudgetExhausted { expansions: 1 })
    );
}
