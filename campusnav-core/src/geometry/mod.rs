//! Great-circle distance and spatial lookup over node positions

mod distance;
mod index;

pub use distance::{haversine, meters_to_degrees};
pub use index::{LinearIndex, RTreeIndex, SpatialIndex};
