//! Generation requests as sent by the map front end
//!
//! ```json
//! {
//!     "points": [{"lat": -6.900, "lon": 107.600}, {"lat": -6.901, "lon": 107.601}],
//!     "pace_minutes": 6,
//!     "activity_type": "Run",
//!     "laps": 1
//! }
//! ```
//!
//! Everything but `points` is optional.

use crate::{Activity, Coordinate, Result, RouteError};
use serde::{Deserialize, Serialize};

fn default_pace_minutes() -> f64 {
    6.0
}

fn default_activity_type() -> String {
    "Run".to_string()
}

fn default_laps() -> i64 {
    1
}

/// A decoded generation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteRequest {
    #[serde(default)]
    pub points: Option<Vec<Coordinate>>,
    #[serde(default = "default_pace_minutes")]
    pub pace_minutes: f64,
    #[serde(default = "default_activity_type")]
    pub activity_type: String,
    /// Signed so that zero and negative counts surface as parameter errors
    #[serde(default = "default_laps")]
    pub laps: i64,
}

impl RouteRequest {
    /// Check the route and return its points
    pub fn validate(&self) -> Result<&[Coordinate]> {
        let points = self
            .points
            .as_deref()
            .ok_or_else(|| RouteError::InvalidRoute("No points provided".to_string()))?;

        if points.len() < 2 {
            return Err(RouteError::InvalidRoute(
                "At least 2 points required".to_string(),
            ));
        }
        Ok(points)
    }

    /// Activity parameters for the synthesizer
    pub fn activity(&self) -> Result<Activity> {
        let laps = u32::try_from(self.laps)
            .ok()
            .filter(|laps| *laps >= 1)
            .ok_or_else(|| {
                RouteError::InvalidParameter(format!("laps must be at least 1, got {}", self.laps))
            })?;

        Ok(Activity {
            pace_minutes_per_km: self.pace_minutes,
            label: self.activity_type.clone(),
            laps,
        })
    }
}

/// JSON error payload, `{"error": "<message>"}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl From<&RouteError> for ErrorBody {
    fn from(err: &RouteError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}
