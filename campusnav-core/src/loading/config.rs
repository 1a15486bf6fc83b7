use crate::{DEFAULT_COORDINATE_PRECISION, DEFAULT_SNAP_THRESHOLD_M, Error, Meters};

/// Settings for graph construction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphConfig {
    snap_threshold_m: Meters,
    coordinate_precision: u32,
}

impl GraphConfig {
    /// Highest supported number of decimals for node keys
    pub const MAX_PRECISION: u32 = 9;

    /// Creates a validated configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the snap threshold is negative or not finite,
    /// or if the precision exceeds [`Self::MAX_PRECISION`].
    pub fn new(snap_threshold_m: Meters, coordinate_precision: u32) -> Result<Self, Error> {
        if !snap_threshold_m.is_finite() || snap_threshold_m < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "snap threshold must be a non-negative number of meters, got {snap_threshold_m}"
            )));
        }

        if coordinate_precision > Self::MAX_PRECISION {
            return Err(Error::InvalidConfig(format!(
                "coordinate precision must be at most {} decimals, got {coordinate_precision}",
                Self::MAX_PRECISION
            )));
        }

        Ok(Self {
            snap_threshold_m,
            coordinate_precision,
        })
    }

    /// Default precision with a custom snap threshold
    ///
    /// # Errors
    ///
    /// See [`GraphConfig::new`].
    pub fn with_snap_threshold(snap_threshold_m: Meters) -> Result<Self, Error> {
        Self::new(snap_threshold_m, DEFAULT_COORDINATE_PRECISION)
    }

    /// Vertices at most this far from a kept node are merged into it.
    /// Zero disables snapping; rounding still applies.
    pub fn snap_threshold_m(&self) -> Meters {
        self.snap_threshold_m
    }

    pub fn coordinate_precision(&self) -> u32 {
        self.coordinate_precision
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            snap_threshold_m: DEFAULT_SNAP_THRESHOLD_M,
            coordinate_precision: DEFAULT_COORDINATE_PRECISION,
        }
    }
}
