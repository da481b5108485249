//! GPX loading
//!
//! Flattens every track segment of a GPX document into one ordered sequence of
//! [`GpsPoint`]s, in document order.

use crate::Result;
use run_metrics_lib::GpsPoint;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

/// Points and place name of one GPX file
#[derive(Debug, Clone, Default)]
pub struct LoadedTrack {
    /// Metadata name, else the first track's name, else empty
    pub location: String,
    pub points: Vec<GpsPoint>,
}

/// Load a GPX file from disk
pub fn load_track(path: &Path) -> Result<LoadedTrack> {
    #[cfg(feature = "profiling")]
    profiling::scope!("loader::load_track");

    let file = File::open(path)?;
    read_track(BufReader::new(file))
}

/// Read a GPX document from any reader
pub fn read_track<R: Read>(reader: R) -> Result<LoadedTrack> {
    let gpx_data = gpx::read(reader)?;
    from_gpx(&gpx_data)
}

/// Extract location and points from parsed GPX data
pub fn from_gpx(gpx_data: &gpx::Gpx) -> Result<LoadedTrack> {
    let mut points = Vec::new();

    for track in &gpx_data.tracks {
        for segment in &track.segments {
            points.reserve(segment.points.len());
            for waypoint in &segment.points {
                // Points without a time are kept; the engine counts 0 s for them
                let timestamp = match waypoint.time {
                    Some(time) => format_timestamp(time.into())?,
                    None => String::new(),
                };
                points.push(GpsPoint::from_geo(waypoint.point(), timestamp));
            }
        }
    }

    tracing::debug!(
        "Loaded {} points from {} tracks",
        points.len(),
        gpx_data.tracks.len()
    );

    Ok(LoadedTrack {
        location: location(gpx_data),
        points,
    })
}

fn location(gpx_data: &gpx::Gpx) -> String {
    gpx_data
        .metadata
        .as_ref()
        .and_then(|metadata| metadata.name.clone())
        .or_else(|| gpx_data.tracks.first().and_then(|track| track.name.clone()))
        .unwrap_or_default()
}

/// Render an instant as `YYYY-MM-DDTHH:MM:SS.mmmZ` in UTC
pub fn format_timestamp(instant: OffsetDateTime) -> Result<String> {
    Ok(instant.to_offset(UtcOffset::UTC).format(format_description!(
        "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
    ))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="tests" xmlns="http://www.topografix.com/GPX/1/1">
  <metadata><name>Riverside loop</name></metadata>
  <trk>
    <name>Morning run</name>
    <trkseg>
      <trkpt lat="51.5000" lon="-0.1200"><time>2024-05-01T07:00:00.000Z</time></trkpt>
      <trkpt lat="51.5045" lon="-0.1200"><time>2024-05-01T07:02:30.250Z</time></trkpt>
    </trkseg>
    <trkseg>
      <trkpt lat="51.5090" lon="-0.1200"><time>2024-05-01T07:05:00.000Z</time></trkpt>
      <trkpt lat="51.5100" lon="-0.1210"></trkpt>
    </trkseg>
  </trk>
</gpx>"#;

    #[test]
    fn test_points_in_document_order() {
        let track = read_track(SAMPLE.as_bytes()).unwrap();
        assert_eq!(track.points.len(), 4);

        let latitudes: Vec<_> = track.points.iter().map(|p| p.latitude()).collect();
        assert_eq!(latitudes, vec![51.5, 51.5045, 51.509, 51.51]);
        assert_eq!(track.points[3].longitude(), -0.121);
    }

    #[test]
    fn test_timestamps_keep_milliseconds() {
        let track = read_track(SAMPLE.as_bytes()).unwrap();
        assert_eq!(track.points[0].timestamp(), "2024-05-01T07:00:00.000Z");
        assert_eq!(track.points[1].timestamp(), "2024-05-01T07:02:30.250Z");
        assert_eq!(track.points[3].timestamp(), "");
    }

    #[test]
    fn test_location_prefers_metadata_name() {
        let track = read_track(SAMPLE.as_bytes()).unwrap();
        assert_eq!(track.location, "Riverside loop");

        let without_metadata =
            SAMPLE.replace("<metadata><name>Riverside loop</name></metadata>", "");
        let track = read_track(without_metadata.as_bytes()).unwrap();
        assert_eq!(track.location, "Morning run");
    }

    #[test]
    fn test_format_timestamp_converts_to_utc() {
        let instant = datetime!(2024-05-01 09:00:00.5 +02:00);
        assert_eq!(
            format_timestamp(instant).unwrap(),
            "2024-05-01T07:00:00.500Z"
        );
    }

    #[test]
    fn test_formatted_timestamps_parse_back() {
        let text = format_timestamp(datetime!(2024-05-01 07:00:00.123 UTC)).unwrap();
        let parsed = run_metrics_lib::timestamp::parse_timestamp(&text).unwrap();
        assert_eq!(parsed.millisecond(), 123);
    }

    #[test]
    fn test_malformed_document_fails() {
        assert!(read_track("this is not xml".as_bytes()).is_err());
    }
}
