//! Run-level aggregation
//!
//! This module provides [`RunSummary`], the run-wide statistics derived from an
//! ordered sequence of track points, and the functions computing it.

use crate::distance::segment_distance_m;
use crate::timestamp::{TimeDelta, TimestampError};
use crate::{GpsPoint, MetricsConfig};
use std::fmt;

/// Coarse classification of run length
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Difficulty {
    Easy,
    EasyNormal,
    Normal,
    NormalHard,
    Hard,
}

impl Difficulty {
    /// Difficulty band for a distance in kilometers (upper bounds are inclusive)
    pub fn from_distance_km(distance_km: f64) -> Self {
        if distance_km <= 5.0 {
            Difficulty::Easy
        } else if distance_km <= 10.0 {
            Difficulty::EasyNormal
        } else if distance_km <= 15.0 {
            Difficulty::Normal
        } else if distance_km <= 20.0 {
            Difficulty::NormalHard
        } else {
            Difficulty::Hard
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::EasyNormal => "EASY_NORMAL",
            Difficulty::Normal => "NORMAL",
            Difficulty::NormalHard => "NORMAL_HARD",
            Difficulty::Hard => "HARD",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a summary was computed from enough data to be trusted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryStatus {
    /// At least two points were available
    Complete,
    /// Fewer than two points; every metric is zero
    InsufficientPoints { points: usize },
}

/// A time difference that could not be computed and counted as zero
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Index of the segment, i.e. of its first point in the track
    pub segment_index: usize,
    pub error: TimestampError,
}

/// Run-wide statistics of a track
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Timestamp of the first point, carried through unmodified
    pub start_timestamp: String,
    /// Human readable place name, filled in by whoever loads the track
    pub location: String,
    pub distance_km: f64,
    /// Sum of the pairwise time differences
    pub duration_seconds: i64,
    pub kilocalories: i64,
    /// Mean pace in seconds per kilometer, zero when no distance was covered
    pub mean_pace_sec_per_km: i64,
    /// `None` for degenerate summaries
    pub difficulty: Option<Difficulty>,
    pub status: SummaryStatus,
    /// Segments whose time difference was substituted by zero
    pub diagnostics: Vec<Diagnostic>,
}

impl RunSummary {
    /// The zero-valued summary standing in for tracks with fewer than two points
    pub fn degenerate(points: usize) -> Self {
        Self {
            start_timestamp: String::new(),
            location: String::new(),
            distance_km: 0.0,
            duration_seconds: 0,
            kilocalories: 0,
            mean_pace_sec_per_km: 0,
            difficulty: None,
            status: SummaryStatus::InsufficientPoints { points },
            diagnostics: Vec::new(),
        }
    }

    /// True if the summary was computed from fewer than two points
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        matches!(self.status, SummaryStatus::InsufficientPoints { .. })
    }

    /// True if at least one segment's duration was substituted by zero
    #[inline]
    pub fn is_degraded(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Attach a location name
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }
}

/// Kilocalories burned over one segment, truncated toward zero
#[inline]
pub fn segment_kcal(config: &MetricsConfig, segment_distance_m: f64) -> i64 {
    (segment_distance_m * config.kcal_factor * config.body_mass_kg) as i64
}

/// Mean pace in seconds per kilometer, truncated, or zero without distance
#[inline]
pub(crate) fn pace_sec_per_km(seconds: i64, distance_m: f64) -> i64 {
    if distance_m > 0.0 {
        (seconds as f64 / (distance_m / 1000.0)) as i64
    } else {
        0
    }
}

/// Compute the run summary of a track with the default configuration
pub fn run_summary(points: &[GpsPoint]) -> RunSummary {
    run_summary_with(&MetricsConfig::default(), points)
}

/// Compute the run summary of a track
///
/// Tracks with fewer than two points produce [`RunSummary::degenerate`] and a
/// warning; this is never an error. Callers must check
/// [`RunSummary::is_degenerate`] before trusting the numbers.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn run_summary_with(config: &MetricsConfig, points: &[GpsPoint]) -> RunSummary {
    if points.len() < 2 {
        tracing::warn!(
            "Not enough GPS points to calculate run info ({} points)",
            points.len()
        );
        return RunSummary::degenerate(points.len());
    }

    let mut total_distance_m = 0.0;
    let mut total_seconds = 0;
    let mut total_kcal = 0;
    let mut diagnostics = Vec::new();

    for (index, pair) in points.windows(2).enumerate() {
        let segment_m = segment_distance_m(config, &pair[0], &pair[1]);
        total_distance_m += segment_m;

        let delta = TimeDelta::between(pair[0].timestamp(), pair[1].timestamp());
        total_seconds += delta.seconds();
        if let TimeDelta::Substituted(error) = delta {
            diagnostics.push(Diagnostic {
                segment_index: index,
                error,
            });
        }

        total_kcal += segment_kcal(config, segment_m);
    }

    let distance_km = total_distance_m / 1000.0;

    RunSummary {
        start_timestamp: points[0].timestamp().to_string(),
        location: String::new(),
        distance_km,
        duration_seconds: total_seconds,
        kilocalories: total_kcal,
        mean_pace_sec_per_km: pace_sec_per_km(total_seconds, total_distance_m),
        difficulty: Some(Difficulty::from_distance_km(distance_km)),
        status: SummaryStatus::Complete,
        diagnostics,
    }
}
