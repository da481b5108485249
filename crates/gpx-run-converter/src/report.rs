//! JSON run report
//!
//! Layout of the document written for every track:
//!
//! ```json
//! {
//!   "runInfo": {"runStartDate": "...", "location": "...", "distance": 2.0,
//!               "time": 600, "kcal": 14, "meanPace": 300, "difficulty": "EASY"},
//!   "sectionData": {"pace": [300, 300], "kcal": [7, 7]},
//!   "gpsData": [{"lon": -0.12, "lat": 51.5, "time": "..."}]
//! }
//! ```

use crate::Result;
use run_metrics_lib::{GpsPoint, RunSummary, SectionSeries};
use serde::Serialize;
use std::io::Write;

/// Serializable view over a summary, its sections and the raw points
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport<'a> {
    run_info: RunInfo<'a>,
    section_data: &'a SectionSeries,
    gps_data: Vec<GpsEntry<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RunInfo<'a> {
    run_start_date: &'a str,
    location: &'a str,
    /// Kilometers
    distance: f64,
    /// Seconds
    time: i64,
    kcal: i64,
    /// Seconds per kilometer
    mean_pace: i64,
    /// Empty for degenerate summaries
    difficulty: &'static str,
}

#[derive(Debug, Serialize)]
struct GpsEntry<'a> {
    lon: f64,
    lat: f64,
    time: &'a str,
}

impl<'a> RunReport<'a> {
    pub fn new(
        summary: &'a RunSummary,
        sections: &'a SectionSeries,
        points: &'a [GpsPoint],
    ) -> Self {
        Self {
            run_info: RunInfo {
                run_start_date: &summary.start_timestamp,
                location: &summary.location,
                distance: summary.distance_km,
                time: summary.duration_seconds,
                kcal: summary.kilocalories,
                mean_pace: summary.mean_pace_sec_per_km,
                difficulty: summary.difficulty.map_or("", |d| d.as_str()),
            },
            section_data: sections,
            gps_data: points
                .iter()
                .map(|point| GpsEntry {
                    lon: point.longitude(),
                    lat: point.latitude(),
                    time: point.timestamp(),
                })
                .collect(),
        }
    }

    /// Render the report as a JSON string
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// Write the report followed by a newline
    pub fn write_to<W: Write>(&self, mut writer: W, pretty: bool) -> Result<()> {
        if pretty {
            serde_json::to_writer_pretty(&mut writer, self)?;
        } else {
            serde_json::to_writer(&mut writer, self)?;
        }
        writeln!(writer)?;
        Ok(())
    }
}
