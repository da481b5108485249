//! Per-kilometer section splits
//!
//! A track is cut into contiguous sections, each closed as soon as it has
//! accumulated at least `section_length_m` meters. The final section is closed at
//! the last point regardless of its length. Pace and calories are split in two
//! independent passes that share this boundary rule, so both series always have
//! the same number of entries.

use crate::distance::segment_distance_m;
use crate::summary::{pace_sec_per_km, segment_kcal};
use crate::timestamp::TimeDelta;
use crate::{GpsPoint, MetricsConfig};
#[cfg(feature = "serde")]
use serde::Serialize;

/// Pace (seconds per kilometer) and kilocalories of every section of a track
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SectionSeries {
    pub pace: Vec<i64>,
    pub kcal: Vec<i64>,
}

impl SectionSeries {
    /// Number of sections
    #[inline]
    pub fn len(&self) -> usize {
        self.pace.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pace.is_empty()
    }
}

/// Running totals of the section being built
struct SectionAccumulator {
    length_m: f64,
    distance_m: f64,
    value: i64,
}

impl SectionAccumulator {
    fn new(length_m: f64) -> Self {
        Self {
            length_m,
            distance_m: 0.0,
            value: 0,
        }
    }

    /// Add one segment; returns the closed section's (distance, value) and resets
    /// when the section is long enough or `is_last` is set
    fn push(&mut self, segment_m: f64, value: i64, is_last: bool) -> Option<(f64, i64)> {
        self.distance_m += segment_m;
        self.value += value;

        if self.distance_m >= self.length_m || is_last {
            let closed = (self.distance_m, self.value);
            self.distance_m = 0.0;
            self.value = 0;
            Some(closed)
        } else {
            None
        }
    }
}

/// Pace of every section with the default configuration
pub fn pace_sections(points: &[GpsPoint]) -> Vec<i64> {
    pace_sections_with(&MetricsConfig::default(), points)
}

/// Pace of every section, in whole seconds per kilometer
///
/// Sections without distance report a pace of zero.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn pace_sections_with(config: &MetricsConfig, points: &[GpsPoint]) -> Vec<i64> {
    let mut sections = Vec::new();
    let mut accumulator = SectionAccumulator::new(config.section_length_m);
    let last = points.len().saturating_sub(2);

    for (index, pair) in points.windows(2).enumerate() {
        let segment_m = segment_distance_m(config, &pair[0], &pair[1]);
        let seconds = TimeDelta::between(pair[0].timestamp(), pair[1].timestamp()).seconds();

        if let Some((distance_m, seconds)) = accumulator.push(segment_m, seconds, index == last) {
            sections.push(pace_sec_per_km(seconds, distance_m));
        }
    }

    sections
}

/// Kilocalories of every section with the default configuration
pub fn kcal_sections(points: &[GpsPoint]) -> Vec<i64> {
    kcal_sections_with(&MetricsConfig::default(), points)
}

/// Kilocalories of every section, summed from per-segment truncated values
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn kcal_sections_with(config: &MetricsConfig, points: &[GpsPoint]) -> Vec<i64> {
    let mut sections = Vec::new();
    let mut accumulator = SectionAccumulator::new(config.section_length_m);
    let last = points.len().saturating_sub(2);

    for (index, pair) in points.windows(2).enumerate() {
        let segment_m = segment_distance_m(config, &pair[0], &pair[1]);

        if let Some((_, kcal)) =
            accumulator.push(segment_m, segment_kcal(config, segment_m), index == last)
        {
            sections.push(kcal);
        }
    }

    sections
}

/// Both section series of a track
pub fn section_series(config: &MetricsConfig, points: &[GpsPoint]) -> SectionSeries {
    let series = SectionSeries {
        pace: pace_sections_with(config, points),
        kcal: kcal_sections_with(config, points),
    };
    debug_assert_eq!(series.pace.len(), series.kcal.len());
    series
}
