use std::sync::{Arc, PoisonError, RwLock};

use geo::Point;
use geojson::{Feature, FeatureCollection};
use log::{debug, info};
use rayon::prelude::*;
use serde_json::Value as JsonValue;

use campusnav_core::prelude::*;

use crate::config::{ConfigError, RouterConfig};

/// A computed walking route
#[derive(Debug, Clone)]
pub struct Route {
    /// Graph nodes from start to goal, both included
    pub path: Vec<NodeId>,
    /// Walking distance along the corridors in meters
    pub distance_m: Meters,
    /// Distance from the requested origin to the first node
    pub start_offset_m: Meters,
    /// Distance from the last node to the requested destination
    pub goal_offset_m: Meters,
    /// `LineString` feature tagged with the route layer
    pub feature: Feature,
}

impl Route {
    /// Origin and destination resolved to the same node
    pub fn is_trivial(&self) -> bool {
        self.path.len() == 1
    }
}

/// Routing entry point for the map host.
///
/// Holds the current corridor graph as an immutable snapshot. A rebuild
/// constructs the new graph completely before publishing it, so queries in
/// flight keep using the snapshot they started with.
#[derive(Debug)]
pub struct Router {
    graph_config: GraphConfig,
    limits: SearchLimits,
    current: RwLock<Arc<CorridorGraph>>,
}

impl Router {
    /// Creates a router with an empty graph
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: &RouterConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            graph_config: config.graph_config()?,
            limits: config.search_limits(),
            current: RwLock::new(Arc::new(CorridorGraph::default())),
        })
    }

    /// The graph queries currently run against
    pub fn snapshot(&self) -> Arc<CorridorGraph> {
        // The lock only guards a pointer swap, a poisoned guard is still valid
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    /// Builds a graph from typed corridor features and publishes it
    pub fn rebuild(&self, corridors: &FeatureCollection) -> Arc<CorridorGraph> {
        self.publish(build_graph(corridors, &self.graph_config))
    }

    /// Builds a graph from loosely-typed corridor `GeoJSON` and publishes it
    pub fn rebuild_from_json(&self, corridors: &JsonValue) -> Arc<CorridorGraph> {
        self.publish(build_graph_from_json(corridors, &self.graph_config))
    }

    /// Parses corridor `GeoJSON` text, then behaves like [`Router::rebuild_from_json`]
    ///
    /// # Errors
    ///
    /// Returns [`Error::GeoJsonError`] if the text is not JSON at all; the
    /// current snapshot is left untouched in that case.
    pub fn rebuild_from_str(&self, corridors: &str) -> Result<Arc<CorridorGraph>, Error> {
        let value: JsonValue =
            serde_json::from_str(corridors).map_err(|e| Error::GeoJsonError(e.to_string()))?;
        Ok(self.rebuild_from_json(&value))
    }

    fn publish(&self, graph: CorridorGraph) -> Arc<CorridorGraph> {
        let graph = Arc::new(graph);
        info!(
            "Publishing corridor graph with {} nodes and {} edges",
            graph.node_count(),
            graph.edge_count()
        );

        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::clone(&graph);
        graph
    }

    /// Walking route between two coordinates (`x` = lng, `y` = lat).
    ///
    /// Both ends are resolved to their nearest graph nodes. Returns
    /// `Ok(None)` when those nodes are not connected.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyGraph`] before any corridors were loaded,
    /// [`Error::InvalidCoordinate`] for non-finite input and
    /// [`Error::SearchBudgetExhausted`] when the configured budget runs out.
    pub fn route(&self, from: Point<f64>, to: Point<f64>) -> Result<Option<Route>, Error> {
        route_on(&self.snapshot(), &self.limits, from, to)
    }

    /// Independent routes for many origin/destination pairs, computed in
    /// parallel against a single snapshot. Results keep the input order.
    pub fn route_many(
        &self,
        pairs: &[(Point<f64>, Point<f64>)],
    ) -> Vec<Result<Option<Route>, Error>> {
        let graph = self.snapshot();
        pairs
            .par_iter()
            .map(|&(from, to)| route_on(&graph, &self.limits, from, to))
            .collect()
    }
}

fn route_on(
    graph: &CorridorGraph,
    limits: &SearchLimits,
    from: Point<f64>,
    to: Point<f64>,
) -> Result<Option<Route>, Error> {
    let (start, start_offset_m) = nearest_node_with_distance(graph, from.y(), from.x())?;
    let (goal, goal_offset_m) = nearest_node_with_distance(graph, to.y(), to.x())?;

    let Some(path) = find_path_with::<HeapFrontier>(graph, start, goal, limits)? else {
        debug!("No corridor connection between {from:?} and {to:?}");
        return Ok(None);
    };

    Ok(Some(Route {
        distance_m: path_length(graph, &path)?,
        feature: path_to_feature(graph, &path)?,
        path,
        start_offset_m,
        goal_offset_m,
    }))
}
