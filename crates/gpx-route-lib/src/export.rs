//! GPX export of synthesized tracks
//!
//! A [`Track`] becomes a GPX 1.1 document with a single `<trk>` and one `<trkseg>` per lap.

use crate::{Result, Track};
use gpx::{Gpx, GpxVersion, TrackSegment, Waypoint};
use std::io::Write;
use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// MIME type for served GPX downloads
pub const GPX_MIME_TYPE: &str = "application/gpx+xml";

/// Default `creator` attribute of exported documents
pub const DEFAULT_CREATOR: &str = "GPX Route Generator";

const FILENAME_TIMESTAMP: &[BorrowedFormatItem<'static>] =
    format_description!("[year][month][day]_[hour][minute][second]");

/// Build the GPX document for `track`
pub fn to_gpx(track: &Track, creator: &str) -> Gpx {
    #[cfg(feature = "profiling")]
    profiling::scope!("export::to_gpx");

    let segments = track
        .segments
        .iter()
        .map(|segment| TrackSegment {
            points: segment
                .points
                .iter()
                .map(|point| {
                    let mut waypoint = Waypoint::new(point.coordinate.into());
                    waypoint.elevation = Some(point.elevation);
                    waypoint.time = Some(point.time.into());
                    waypoint
                })
                .collect(),
        })
        .collect();

    let gpx_track = gpx::Track {
        name: Some(track.name.clone()),
        type_: Some(track.activity_type.clone()),
        segments,
        ..Default::default()
    };

    Gpx {
        version: GpxVersion::Gpx11,
        creator: Some(creator.to_string()),
        tracks: vec![gpx_track],
        ..Default::default()
    }
}

/// Serialize `track` as GPX XML into `writer`
pub fn write_gpx<W: Write>(track: &Track, creator: &str, writer: W) -> Result<()> {
    gpx::write(&to_gpx(track, creator), writer)?;
    Ok(())
}

/// Serialize `track` as GPX XML into a byte buffer
pub fn to_gpx_bytes(track: &Track, creator: &str) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    write_gpx(track, creator, &mut buffer)?;
    Ok(buffer)
}

/// Download name for a track, `route_{activity}_{YYYYMMDD_HHMMSS}.gpx`
pub fn suggested_filename(activity_type: &str, at: OffsetDateTime) -> Result<String> {
    let timestamp = at.format(FILENAME_TIMESTAMP)?;
    Ok(format!(
        "route_{}_{}.gpx",
        activity_type.to_lowercase(),
        timestamp
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Activity, Coordinate, TrackSynthesizer};
    use std::io::Cursor;
    use time::macros::datetime;

    fn sample_track(laps: u32) -> Track {
        let route = [
            Coordinate::new(-6.900, 107.600),
            Coordinate::new(-6.901, 107.601),
            Coordinate::new(-6.899, 107.602),
        ];
        let activity = Activity {
            laps,
            label: "Ride".to_string(),
            ..Activity::default()
        };
        TrackSynthesizer::default()
            .synthesize(&route, &activity, datetime!(2024-05-01 06:00 UTC))
            .unwrap()
    }

    #[test]
    fn test_to_gpx_structure() {
        let track = sample_track(2);
        let gpx = to_gpx(&track, DEFAULT_CREATOR);

        assert!(matches!(gpx.version, GpxVersion::Gpx11));
        assert_eq!(gpx.creator.as_deref(), Some(DEFAULT_CREATOR));
        assert_eq!(gpx.tracks.len(), 1);

        let gpx_track = &gpx.tracks[0];
        assert_eq!(gpx_track.name.as_deref(), Some("Ride Activity"));
        assert_eq!(gpx_track.type_.as_deref(), Some("Ride"));
        assert_eq!(gpx_track.segments.len(), 2);
        assert_eq!(
            gpx_track.segments[0].points.len(),
            track.segments[0].points.len()
        );

        let first = &gpx_track.segments[0].points[0];
        assert_eq!(first.point().y(), -6.900);
        assert_eq!(first.point().x(), 107.600);
        assert_eq!(first.elevation, Some(700.0));
        assert!(first.time.is_some());
    }

    #[test]
    fn test_written_gpx_reads_back() {
        let track = sample_track(3);
        let bytes = to_gpx_bytes(&track, "test-suite").unwrap();

        let xml = String::from_utf8(bytes.clone()).unwrap();
        assert!(xml.contains("<trkseg>"));
        assert!(xml.contains("<ele>"));

        let parsed = gpx::read(Cursor::new(bytes)).unwrap();
        assert_eq!(parsed.tracks.len(), 1);
        assert_eq!(parsed.tracks[0].segments.len(), 3);
        assert_eq!(parsed.tracks[0].type_.as_deref(), Some("Ride"));
        assert_eq!(
            parsed.tracks[0].segments[2].points.len(),
            track.segments[2].points.len()
        );
    }

    #[test]
    fn test_suggested_filename() {
        let at = datetime!(2024-03-07 09:05:03 UTC);
        assert_eq!(
            suggested_filename("Run", at).unwrap(),
            "route_run_20240307_090503.gpx"
        );
        assert_eq!(
            suggested_filename("Trail Walk", at).unwrap(),
            "route_trail walk_20240307_090503.gpx"
        );
        assert_eq!(GPX_MIME_TYPE, "application/gpx+xml");
    }
}
