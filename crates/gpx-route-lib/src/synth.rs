//! TrackSynthesizer - Turns a sparse route into a paced, multi-lap track
//!
//! Every lap is closed into a loop when more than one lap is requested, densified with
//! [`interpolate_points`], and timed by spreading the lap's pace-derived duration evenly
//! over its points.

use crate::{
    Coordinate, Result, RouteError, Segment, Track, TrackPoint, interpolate_points, utils,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

/// Configuration shared by every synthesis run
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// Target spacing between consecutive track points in meters.
    /// Default: 5.0
    pub target_interval_m: f64,
    /// Placeholder elevation written on every point, in meters.
    /// Default: 700.0
    pub elevation_m: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_interval_m: 5.0,
            elevation_m: 700.0,
        }
    }
}

/// Per-request activity parameters
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Activity {
    /// Average pace in minutes per kilometer
    pub pace_minutes_per_km: f64,
    /// Free-text activity label
    pub label: String,
    /// Number of laps, at least 1
    pub laps: u32,
}

impl Default for Activity {
    fn default() -> Self {
        Self {
            pace_minutes_per_km: 6.0,
            label: "Run".to_string(),
            laps: 1,
        }
    }
}

/// Stateless track synthesizer
///
/// Holds only immutable configuration, so a single instance can serve any number of
/// concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct TrackSynthesizer {
    config: Config,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl TrackSynthesizer {
    /// Create a new synthesizer with the given configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Access the configuration
    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Synthesize a timestamped track from `route`
    ///
    /// Lap `n` starts at `start_time` plus the summed duration of laps `0..n`. All
    /// parameters are validated before any work is done, so an error never comes with a
    /// partial track.
    pub fn synthesize(
        &self,
        route: &[Coordinate],
        activity: &Activity,
        start_time: OffsetDateTime,
    ) -> Result<Track> {
        self.validate(route, activity)?;

        let pace = utils::pace_seconds_per_meter(activity.pace_minutes_per_km);
        let mut track = Track::new(activity.label.as_str());
        let mut elapsed_seconds = 0.0;

        for lap in 0..activity.laps {
            let lap_route = close_loop(route, activity.laps, lap);
            let points = interpolate_points(&lap_route, self.config.target_interval_m);

            let distance_meters = utils::path_length(&points);
            let duration_seconds = distance_meters * pace;
            let steps = points.len().saturating_sub(1).max(1) as f64;

            if points.len() < 2 || distance_meters == 0.0 {
                tracing::warn!(
                    "Lap {} is degenerate: {} points over {:.1} m",
                    lap + 1,
                    points.len(),
                    distance_meters
                );
            }

            // Offsets are taken from the track start so the last point of a lap lands on
            // exactly the same instant as the first point of the next one
            let points = points
                .into_iter()
                .enumerate()
                .map(|(i, coordinate)| -> Result<TrackPoint> {
                    let fraction = i as f64 / steps;
                    Ok(TrackPoint {
                        coordinate,
                        elevation: self.config.elevation_m,
                        time: offset_time(
                            start_time,
                            elapsed_seconds + duration_seconds * fraction,
                        )?,
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            tracing::debug!(
                "Lap {}/{}: {} points, {:.1} m, {:.1} s",
                lap + 1,
                activity.laps,
                points.len(),
                distance_meters,
                duration_seconds
            );

            track.segments.push(Segment {
                points,
                distance_meters,
                duration_seconds,
            });
            elapsed_seconds += duration_seconds;
        }

        Ok(track)
    }

    fn validate(&self, route: &[Coordinate], activity: &Activity) -> Result<()> {
        if route.len() < 2 {
            return Err(RouteError::InvalidRoute(
                "At least 2 points required".to_string(),
            ));
        }
        if !(activity.pace_minutes_per_km.is_finite() && activity.pace_minutes_per_km > 0.0) {
            return Err(RouteError::InvalidParameter(format!(
                "pace must be positive, got {}",
                activity.pace_minutes_per_km
            )));
        }
        if activity.laps < 1 {
            return Err(RouteError::InvalidParameter(
                "laps must be at least 1".to_string(),
            ));
        }
        let interval = self.config.target_interval_m;
        if !(interval.is_finite() && interval > 0.0) {
            return Err(RouteError::InvalidParameter(format!(
                "target interval must be positive, got {interval}"
            )));
        }
        Ok(())
    }
}

/// Copy of `route` for lap `lap`, closed back to its first point when looping
///
/// A single lap is treated as a point-to-point route and left open.
fn close_loop(route: &[Coordinate], laps: u32, lap: u32) -> Vec<Coordinate> {
    let looping = laps > 1 || lap > 0;
    let mut lap_route = route.to_vec();
    match (route.first(), route.last()) {
        (Some(&first), Some(&last)) if looping && first != last => lap_route.push(first),
        _ => {}
    }
    lap_route
}

fn offset_time(base: OffsetDateTime, seconds: f64) -> Result<OffsetDateTime> {
    Duration::checked_seconds_f64(seconds)
        .and_then(|offset| base.checked_add(offset))
        .ok_or_else(|| {
            RouteError::TimeOutOfRange(format!("{base} + {seconds} s is not representable"))
        })
}
