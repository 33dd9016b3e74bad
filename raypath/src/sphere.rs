//! Great-circle routines on a spherical Earth.
//!
//! Angles are degrees throughout, including path distance, which is
//! the central angle subtended at the Earth's center. Points follow
//! the [geo] convention of `x` = longitude, `y` = latitude.

use geo::Point;

/// Destination point after traveling `dist_deg` along the great
/// circle leaving `origin` with initial bearing `azimuth_deg`.
///
/// A negative distance travels the reciprocal bearing, which is how
/// "long way round" paths are projected.
pub fn destination(origin: Point<f64>, azimuth_deg: f64, dist_deg: f64) -> Point<f64> {
    let lat = origin.y().to_radians();
    let lon = origin.x().to_radians();
    let az = azimuth_deg.to_radians();
    let delta = dist_deg.to_radians();

    let (lat_sin, lat_cos) = lat.sin_cos();
    let (delta_sin, delta_cos) = delta.sin_cos();

    let lat2 = (lat_sin * delta_cos + lat_cos * delta_sin * az.cos()).asin();
    let lon2 = lon + (az.sin() * delta_sin * lat_cos).atan2(delta_cos - lat_sin * lat2.sin());

    Point::new(wrap_lon(lon2.to_degrees()), lat2.to_degrees())
}

/// Initial bearing of the great circle from `from` to `to`, in
/// degrees clockwise from north, normalized to `[0, 360)`.
pub fn azimuth(from: Point<f64>, to: Point<f64>) -> f64 {
    let lat1 = from.y().to_radians();
    let lat2 = to.y().to_radians();
    let dlon = (to.x() - from.x()).to_radians();

    let y = dlon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();

    (y.atan2(x).to_degrees() + 360.0) % 360.0
}

/// Wraps a longitude into `[-180, 180)`.
fn wrap_lon(lon_deg: f64) -> f64 {
    (lon_deg + 540.0) % 360.0 - 180.0
}
