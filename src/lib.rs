//! In-process campus routing service.
//!
//! Wraps the corridor graph and A* search from `campusnav_core` behind a
//! [`Router`] that the map client owns: load or reload corridor `GeoJSON`,
//! then ask for routes between points of interest or device locations.
//!
//! Example:
//!
//! ```ignore
//! let router = Router::new(&RouterConfig::from_toml_str(&settings)?)?;
//! router.rebuild_from_str(&corridors_geojson)?;
//! if let Some(route) = router.route(entrance, lecture_hall)? {
//!     map.add_layer(route.feature);
//! }
//! ```

pub mod config;
pub mod router;

pub use campusnav_core::{Error, prelude};
pub use config::{ConfigError, RouterConfig};
pub use router::{Route, Router};
