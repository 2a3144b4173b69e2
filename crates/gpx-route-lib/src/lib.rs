//! GPX Route Library - Track synthesis from sparse waypoints
//!
//! This library turns a coarse, hand-drawn path into a densely sampled GPX track whose
//! timestamps follow a target pace, optionally repeated for several laps.
//!
//! # Architecture
//!
//! - **[`utils::haversine_distance`]**: Great-circle distance between two coordinates
//! - **[`interpolate_points`]**: Densifies a route to a fixed point spacing
//! - **[`TrackSynthesizer`]**: Loop closing, interpolation and per-lap time assignment
//! - **[`export`]**: GPX 1.1 serialization and download naming
//! - **[`request`]**: Decoding and validation of generation requests
//!
//! # Example
//!
//! ```
//! use gpx_route_lib::{Activity, Config, Coordinate, TrackSynthesizer};
//! use time::macros::datetime;
//!
//! let route = [
//!     Coordinate::new(-6.900, 107.600),
//!     Coordinate::new(-6.901, 107.601),
//! ];
//! let synthesizer = TrackSynthesizer::new(Config::default());
//! let track = synthesizer
//!     .synthesize(&route, &Activity::default(), datetime!(2024-05-01 06:00 UTC))
//!     .unwrap();
//! assert_eq!(track.segments.len(), 1);
//! ```

pub mod export;
mod interpolate;
#[cfg(feature = "serde")]
pub mod request;
mod synth;
mod track;
pub mod utils;

// Public API exports
pub use interpolate::interpolate_points;
pub use synth::{Activity, Config, TrackSynthesizer};
pub use track::{Coordinate, Segment, Track, TrackPoint};

/// Error types for track synthesis and export
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error("{0}")]
    InvalidRoute(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Timestamp out of range: {0}")]
    TimeOutOfRange(String),

    #[error("GPX writing error: {0}")]
    GpxWrite(#[from] gpx::errors::GpxError),

    #[error("Time formatting error: {0}")]
    TimeFormat(#[from] time::error::Format),
}

impl RouteError {
    /// Status code a transport layer should answer with for this error.
    ///
    /// Missing or insufficient points are the caller's fault (400), everything
    /// else is reported as a generic failure (500).
    pub fn status_code(&self) -> u16 {
        match self {
            RouteError::InvalidRoute(_) => 400,
            _ => 500,
        }
    }
}

pub type Result<T> = std::result::Result<T, RouteError>;
