//! Engine constants
//!
//! All metric computations read their physical constants from a [`MetricsConfig`],
//! so that historic reports produced with a truncated value of pi can still be
//! reproduced exactly.

/// Configuration for the metrics engine
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsConfig {
    /// Value of pi used for degree to radian conversion.
    /// Default: full double precision.
    pub pi: f64,
    /// Sphere radius for the haversine formula, in meters.
    /// Default: 6 371 000 m
    pub earth_radius_m: f64,
    /// Distance a section must accumulate before it is emitted, in meters.
    /// Default: 1000 m
    pub section_length_m: f64,
    /// Kilocalories burned per meter and per kilogram of body mass.
    /// Default: 0.0001
    pub kcal_factor: f64,
    /// Body mass of the runner in kilograms.
    /// Default: 70 kg
    pub body_mass_kg: f64,
}

impl MetricsConfig {
    /// The truncated pi found in older reports.
    #[allow(clippy::approx_constant)]
    pub const LEGACY_PI: f64 = 3.14;

    /// Configuration reproducing reports generated with the truncated pi constant
    pub fn legacy() -> Self {
        Self {
            pi: Self::LEGACY_PI,
            ..Self::default()
        }
    }

    /// Convert degrees to radians with the configured pi
    #[inline]
    pub fn to_radians(&self, degrees: f64) -> f64 {
        degrees * self.pi / 180.0
    }

    /// Whether this configuration uses the legacy pi constant
    #[inline]
    pub fn is_legacy(&self) -> bool {
        self.pi == Self::LEGACY_PI
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            pi: std::f64::consts::PI,
            earth_radius_m: 6_371_000.0,
            section_length_m: 1000.0,
            kcal_factor: 0.0001,
            body_mass_kg: 70.0,
        }
    }
}
