//! Utility functions for distances and pace conversions

use crate::Coordinate;

/// Earth's mean radius in meters
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Seconds per minute, used by pace conversions
const SECONDS_PER_MINUTE: f64 = 60.0;

/// Meters per kilometer, used by pace conversions
const METERS_PER_KM: f64 = 1000.0;

/// Calculate the Haversine distance between two coordinates in meters
///
/// Uses a spherical Earth of radius [`EARTH_RADIUS_M`]. Inputs are not range checked.
/// Identical coordinates yield exactly `0.0` and the result is symmetric in its arguments.
#[inline]
pub fn haversine_distance(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lon = (b.lon - a.lon).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_M * c
}

/// Total length in meters of the polyline through `points`
pub fn path_length(points: &[Coordinate]) -> f64 {
    points
        .windows(2)
        .map(|pair| haversine_distance(pair[0], pair[1]))
        .sum()
}

/// Convert a pace in minutes per kilometer to seconds per meter
#[inline]
pub fn pace_seconds_per_meter(pace_minutes_per_km: f64) -> f64 {
    pace_minutes_per_km * SECONDS_PER_MINUTE / METERS_PER_KM
}
