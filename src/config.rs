use serde::{Deserialize, Serialize};
use thiserror::Error;

use campusnav_core::prelude::*;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse router configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error(transparent)]
    Invalid(#[from] Error),
}

/// Router settings as read from the host's configuration file.
///
/// Example:
///
/// ```toml
/// snap_threshold_m = 1.5
/// coordinate_precision = 6
/// max_expansions = 50000
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RouterConfig {
    /// Radius in meters within which corridor vertices are merged
    pub snap_threshold_m: f64,
    /// Decimal places used to key nodes by coordinates
    pub coordinate_precision: u32,
    /// Upper bound on A* node expansions per query, unlimited if absent
    pub max_expansions: Option<usize>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            snap_threshold_m: DEFAULT_SNAP_THRESHOLD_M,
            coordinate_precision: DEFAULT_COORDINATE_PRECISION,
            max_expansions: None,
        }
    }
}

impl RouterConfig {
    /// Parses and validates a TOML document
    ///
    /// # Errors
    ///
    /// Returns an error for malformed TOML, unknown keys or values that
    /// [`GraphConfig::new`] rejects.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.graph_config()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// See [`GraphConfig::new`].
    pub fn graph_config(&self) -> Result<GraphConfig, Error> {
        GraphConfig::new(self.snap_threshold_m, self.coordinate_precision)
    }

    pub fn search_limits(&self) -> SearchLimits {
        SearchLimits {
            max_expansions: self.max_expansions,
        }
    }
}
