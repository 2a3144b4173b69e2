use gpx_route_lib::export::{self, DEFAULT_CREATOR};
use gpx_route_lib::request::RouteRequest;
use gpx_route_lib::utils::haversine_distance;
use gpx_route_lib::{Config, RouteError, TrackSynthesizer};
use std::io::Cursor;
use time::macros::datetime;
use time::{Duration, OffsetDateTime};

const REQUEST: &str = r#"{
    "points": [
        {"lat": -6.900, "lon": 107.600},
        {"lat": -6.901, "lon": 107.601},
        {"lat": -6.899, "lon": 107.602}
    ],
    "pace_minutes": 5,
    "activity_type": "Run",
    "laps": 3
}"#;

fn run(json: &str, start: OffsetDateTime) -> Result<Vec<u8>, RouteError> {
    let request: RouteRequest = serde_json::from_str(json).unwrap();
    let points = request.validate()?;
    let activity = request.activity()?;
    let track = TrackSynthesizer::new(Config::default()).synthesize(points, &activity, start)?;
    export::to_gpx_bytes(&track, DEFAULT_CREATOR)
}

#[test]
fn request_to_gpx_and_back() {
    let start = datetime!(2024-05-01 06:00 UTC);
    let bytes = run(REQUEST, start).unwrap();
    let gpx = gpx::read(Cursor::new(bytes)).unwrap();

    assert_eq!(gpx.tracks.len(), 1);
    let track = &gpx.tracks[0];
    assert_eq!(track.name.as_deref(), Some("Run Activity"));
    assert_eq!(track.segments.len(), 3);

    let mut previous: Option<OffsetDateTime> = None;
    for segment in &track.segments {
        for point in &segment.points {
            assert_eq!(point.elevation, Some(700.0));
            let time: OffsetDateTime = point.time.clone().unwrap().into();
            if let Some(previous) = previous {
                assert!(time >= previous);
            }
            previous = Some(time);
        }
    }

    // Every lap is looped back to the first waypoint
    for segment in &track.segments {
        let first = segment.points.first().unwrap().point();
        let last = segment.points.last().unwrap().point();
        assert_eq!(first, last);
    }

    let first_time: OffsetDateTime = track.segments[0].points[0].time.clone().unwrap().into();
    assert_eq!(first_time, start);
}

#[test]
fn two_point_route_single_lap() {
    let json = r#"{"points": [{"lat": -6.900, "lon": 107.600}, {"lat": -6.901, "lon": 107.601}]}"#;
    let request: RouteRequest = serde_json::from_str(json).unwrap();
    let points = request.validate().unwrap();
    let track = TrackSynthesizer::default()
        .synthesize(points, &request.activity().unwrap(), datetime!(2024-05-01 06:00 UTC))
        .unwrap();

    let distance = haversine_distance(points[0], points[1]);
    let segment = &track.segments[0];
    assert_eq!(
        segment.points.len(),
        ((distance / 5.0).floor() as usize).max(1) + 1
    );

    // 6 min/km over the straight-line distance
    let expected = Duration::seconds_f64(distance * 0.36);
    let elapsed = segment.end_time().unwrap() - segment.start_time().unwrap();
    assert!((elapsed - expected).abs() < Duration::milliseconds(50));
}

#[test]
fn rejected_requests() {
    let start = datetime!(2024-05-01 06:00 UTC);

    let err = run(r#"{"points": []}"#, start).unwrap_err();
    assert_eq!(err.status_code(), 400);

    let err = run(
        r#"{"points": [{"lat": 0, "lon": 0}, {"lat": 1, "lon": 1}], "pace_minutes": 0}"#,
        start,
    )
    .unwrap_err();
    assert!(matches!(err, RouteError::InvalidParameter(_)));
    assert_eq!(err.status_code(), 500);

    let err = run(
        r#"{"points": [{"lat": 0, "lon": 0}, {"lat": 1, "lon": 1}], "laps": 0}"#,
        start,
    )
    .unwrap_err();
    assert!(matches!(err, RouteError::InvalidParameter(_)));
}
