use std::f64::consts::FRAC_PI_2;

use geo::Point;

use crate::{EARTH_RADIUS_M, Meters};

/// Haversine distance in meters between two points.
///
/// Points are in `GeoJSON` axis order: `x` is longitude, `y` is latitude,
/// both in decimal degrees. The result never exceeds the length of any
/// walkable path between the points, so it doubles as the A* heuristic.
/// Swapping the arguments gives a bit-identical result.
pub fn haversine(a: Point<f64>, b: Point<f64>) -> Meters {
    let lat_a = a.y().to_radians();
    let lat_b = b.y().to_radians();
    let d_lat = (b.y() - a.y()).abs().to_radians();
    let d_lng = (b.x() - a.x()).abs().to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lng / 2.0).sin().powi(2);

    // Rounding can push `h` marginally above 1 for antipodal points
    2.0 * EARTH_RADIUS_M * h.sqrt().min(1.0).asin()
}

/// Half-extents `(d_lng, d_lat)` in degrees of a box around `center` that
/// contains every point within `radius` meters of it.
///
/// A circle that reaches a pole spans every longitude; `d_lng` is then 180.
pub fn meters_to_degrees(center: Point<f64>, radius: Meters) -> (f64, f64) {
    // Slack for floating-point error in the bounds below
    const PADDING: f64 = 1.5;

    let angle = radius / EARTH_RADIUS_M * PADDING;
    let d_lat = angle.to_degrees().min(180.0);

    let colatitude = FRAC_PI_2 - center.y().abs().to_radians();
    if angle >= colatitude {
        return (180.0, d_lat);
    }

    let d_lng = (angle.sin() / center.y().to_radians().cos()).asin().to_degrees();
    (d_lng.min(180.0), d_lat)
}
