//! Corridor network components - node keys, nodes and edges

use std::fmt;

use geo::Point;

use crate::Meters;

/// Stable node identifier derived from rounded coordinates.
///
/// Two vertices that round to the same pair always map to the same key,
/// whatever order the corridors were read in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey {
    lat: i64,
    lng: i64,
    precision: u32,
}

impl NodeKey {
    /// Rounds `lat`/`lng` to `precision` decimals.
    ///
    /// Returns `None` for non-finite coordinates and for coordinates
    /// outside `[-90, 90]` latitude or `[-180, 180]` longitude.
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_coords(lat: f64, lng: f64, precision: u32) -> Option<Self> {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return None;
        }
        let scale = Self::scale(precision);
        Some(Self {
            lat: (lat * scale).round() as i64,
            lng: (lng * scale).round() as i64,
            precision,
        })
    }

    /// Rounded latitude
    #[allow(clippy::cast_precision_loss)]
    pub fn lat(&self) -> f64 {
        self.lat as f64 / Self::scale(self.precision)
    }

    /// Rounded longitude
    #[allow(clippy::cast_precision_loss)]
    pub fn lng(&self) -> f64 {
        self.lng as f64 / Self::scale(self.precision)
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    #[allow(clippy::cast_possible_wrap)]
    fn scale(precision: u32) -> f64 {
        10f64.powi(precision as i32)
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let decimals = self.precision as usize;
        write!(f, "{:.decimals$},{:.decimals$}", self.lat(), self.lng())
    }
}

/// Corridor graph node
#[derive(Debug, Clone)]
pub struct CorridorNode {
    /// Rounded-coordinate identifier
    pub key: NodeKey,
    /// Position of the first raw vertex that created this node
    pub geometry: Point<f64>,
}

impl CorridorNode {
    pub fn lat(&self) -> f64 {
        self.geometry.y()
    }

    pub fn lng(&self) -> f64 {
        self.geometry.x()
    }
}

/// One direction of a corridor segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorridorEdge {
    /// Great-circle length of the segment in meters
    pub weight: Meters,
}
