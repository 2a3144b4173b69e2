//! Route densification to a fixed point spacing

use crate::{Coordinate, utils};

/// Subdivision counts above this are logged, the output grows linearly with them
pub const LARGE_SEGMENT_COUNT: usize = 1_000_000;

/// Insert evenly spaced points between consecutive route waypoints
///
/// Each pair `(p1, p2)` is split into `max(1, floor(distance / target_interval_m))`
/// parts. Intermediate points are linear in latitude and longitude independently, which
/// is a planar approximation that holds at the few-meter spacings this is used with.
/// `p2` is always emitted unchanged, so no error accumulates along the route.
///
/// Routes with fewer than two points are returned as they are. `target_interval_m` must be
/// positive; [`TrackSynthesizer`](crate::TrackSynthesizer) checks this before calling in.
///
/// Memory and time are proportional to `route length / target_interval_m`. A tiny interval
/// over a long route can allocate millions of points; see [`segment_count`].
pub fn interpolate_points(route: &[Coordinate], target_interval_m: f64) -> Vec<Coordinate> {
    #[cfg(feature = "profiling")]
    profiling::scope!("interpolate_points");

    if route.len() < 2 {
        return route.to_vec();
    }

    let mut interpolated = Vec::with_capacity(route.len());
    interpolated.push(route[0]);

    for pair in route.windows(2) {
        let (p1, p2) = (pair[0], pair[1]);

        let segments = segment_count(utils::haversine_distance(p1, p2), target_interval_m);

        for j in 1..segments {
            let ratio = j as f64 / segments as f64;
            interpolated.push(Coordinate {
                lat: p1.lat + (p2.lat - p1.lat) * ratio,
                lon: p1.lon + (p2.lon - p1.lon) * ratio,
            });
        }

        interpolated.push(p2);
    }

    interpolated
}

/// Number of parts a pair `distance` meters apart is split into
///
/// Float to int casts saturate, so NaN counts as 1 and an overflowing ratio as `usize::MAX`.
/// Counts above [`LARGE_SEGMENT_COUNT`] are logged before anything is allocated.
pub fn segment_count(distance: f64, target_interval_m: f64) -> usize {
    let segments = ((distance / target_interval_m) as usize).max(1);
    if segments > LARGE_SEGMENT_COUNT {
        tracing::warn!(
            "Splitting {distance:.1} m at {target_interval_m} m intervals yields {segments} points"
        );
    }
    segments
}
