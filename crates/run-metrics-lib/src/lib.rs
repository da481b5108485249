//! Run Metrics Library - Statistics for GPS tracks of running activities
//!
//! This library turns an ordered sequence of timestamped GPS fixes into run
//! statistics: distance, duration, calorie estimate, mean pace and a difficulty
//! band, plus pace and calorie splits for every kilometer of the track.
//!
//! # Architecture
//!
//! - **[`GpsPoint`]**: Immutable timestamped position
//! - **[`distance`]**: Haversine distance between positions
//! - **[`timestamp`]**: Timestamp parsing and [`TimeDelta`] for skip-and-continue differencing
//! - **[`RunSummary`]**: Run-wide aggregate, with a degenerate form for tracks too short to measure
//! - **[`SectionSeries`]**: Per-section pace and kilocalories
//! - **[`MetricsConfig`]**: Physical constants used by all of the above
//!
//! Everything is pure and synchronous: no I/O, no shared state. Tracks can be
//! analyzed in parallel without coordination.
//!
//! # Example
//!
//! ```
//! use run_metrics_lib::{GpsPoint, MetricsConfig, analyze};
//!
//! let track = [
//!     GpsPoint::new(51.5000, -0.1200, "2024-05-01T07:00:00.000Z"),
//!     GpsPoint::new(51.5090, -0.1200, "2024-05-01T07:05:00.000Z"),
//! ];
//! let analysis = analyze(&MetricsConfig::default(), &track);
//! assert!(!analysis.summary.is_degenerate());
//! assert_eq!(analysis.sections.len(), 1);
//! ```

mod config;
pub mod distance;
mod point;
mod sections;
mod summary;
pub mod timestamp;

// Public API exports
pub use config::MetricsConfig;
pub use point::GpsPoint;
pub use sections::{
    SectionSeries, kcal_sections, kcal_sections_with, pace_sections, pace_sections_with,
    section_series,
};
pub use summary::{
    Diagnostic, Difficulty, RunSummary, SummaryStatus, run_summary, run_summary_with, segment_kcal,
};
pub use timestamp::{TimeDelta, TimestampError};

/// Error types for the metrics engine
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    #[error("Timestamp error: {0}")]
    Timestamp(#[from] TimestampError),
}

pub type Result<T> = std::result::Result<T, MetricsError>;

/// Summary and section splits of one track
#[derive(Debug, Clone)]
pub struct TrackAnalysis {
    pub summary: RunSummary,
    pub sections: SectionSeries,
}

/// Compute the run summary and both section series of a track
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn analyze(config: &MetricsConfig, points: &[GpsPoint]) -> TrackAnalysis {
    TrackAnalysis {
        summary: run_summary_with(config, points),
        sections: section_series(config, points),
    }
}
