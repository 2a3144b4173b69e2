//! Track data model
//!
//! Coordinates come in as raw waypoints, and the synthesizer produces a [`Track`] made of
//! one [`Segment`] per lap.

use time::OffsetDateTime;

/// A latitude/longitude pair in degrees
///
/// Equality is exact on both fields, which is what loop closing relies on.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90)
    pub lat: f64,
    /// Longitude in degrees (-180 to 180)
    pub lon: f64,
}

impl Coordinate {
    #[inline]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl From<Coordinate> for geo::Point<f64> {
    fn from(c: Coordinate) -> Self {
        geo::Point::new(c.lon, c.lat)
    }
}

impl From<geo::Point<f64>> for Coordinate {
    fn from(p: geo::Point<f64>) -> Self {
        Coordinate::new(p.y(), p.x())
    }
}

/// A synthesized sample of the track
#[derive(Clone, Debug, PartialEq)]
pub struct TrackPoint {
    pub coordinate: Coordinate,
    /// Elevation in meters
    pub elevation: f64,
    pub time: OffsetDateTime,
}

/// One lap of the track
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Segment {
    pub points: Vec<TrackPoint>,
    /// Length of the interpolated lap in meters
    pub distance_meters: f64,
    /// Elapsed time over the lap in seconds, derived from the pace
    pub duration_seconds: f64,
}

impl Segment {
    /// Timestamp of the first point, if any
    pub fn start_time(&self) -> Option<OffsetDateTime> {
        self.points.first().map(|p| p.time)
    }

    /// Timestamp of the last point, if any
    pub fn end_time(&self) -> Option<OffsetDateTime> {
        self.points.last().map(|p| p.time)
    }
}

/// The synthesized track handed to the exporter
#[derive(Clone, Debug, PartialEq)]
pub struct Track {
    /// Display name, `"{activity} Activity"`
    pub name: String,
    /// Free-text activity label ("Run", "Ride", ...)
    pub activity_type: String,
    /// One segment per lap, in lap order
    pub segments: Vec<Segment>,
}

impl Track {
    /// Create an empty track for the given activity label
    pub fn new(activity_type: impl Into<String>) -> Self {
        let activity_type = activity_type.into();
        Self {
            name: format!("{activity_type} Activity"),
            activity_type,
            segments: Vec::new(),
        }
    }

    /// Total number of points across all laps
    pub fn total_points(&self) -> usize {
        self.segments.iter().map(|s| s.points.len()).sum()
    }

    /// Total distance across all laps in meters
    pub fn total_distance(&self) -> f64 {
        self.segments.iter().map(|s| s.distance_meters).sum()
    }

    /// Total elapsed time across all laps in seconds
    pub fn total_duration(&self) -> f64 {
        self.segments.iter().map(|s| s.duration_seconds).sum()
    }
}
