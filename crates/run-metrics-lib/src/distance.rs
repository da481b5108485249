//! Great-circle distance between GPS fixes

use crate::{GpsPoint, MetricsConfig};

/// Earth's radius in meters used by the haversine formula
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Calculate the haversine distance in meters between two positions in degrees
///
/// Uses full double precision pi and [`EARTH_RADIUS_M`]. Inputs are not range
/// checked: coordinates outside [-90, 90] / [-180, 180] yield a defined but
/// physically meaningless result.
#[inline]
pub fn haversine_m(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    haversine_m_with(&MetricsConfig::default(), lat1, lon1, lat2, lon2)
}

/// Calculate the haversine distance in meters using the constants of `config`
///
/// # Arguments
/// * `config` - Source of pi and the sphere radius
/// * `lat1`, `lon1` - First position in degrees
/// * `lat2`, `lon2` - Second position in degrees
#[inline]
pub fn haversine_m_with(config: &MetricsConfig, lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = config.to_radians(lat1);
    let phi2 = config.to_radians(lat2);
    let delta_phi = config.to_radians(lat2 - lat1);
    let delta_lambda = config.to_radians(lon2 - lon1);

    let a = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    config.earth_radius_m * c
}

/// Distance in meters between two consecutive track points
#[inline]
pub fn segment_distance_m(config: &MetricsConfig, from: &GpsPoint, to: &GpsPoint) -> f64 {
    haversine_m_with(
        config,
        from.latitude(),
        from.longitude(),
        to.latitude(),
        to.longitude(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_degree_of_longitude_at_equator() {
        let distance = haversine_m(0.0, 0.0, 0.0, 1.0);
        assert!((distance - 111_195.0).abs() < 1.0, "got {distance}");
    }

    #[test]
    fn test_legacy_pi_underestimates() {
        // Known discrepancy of historic reports: pi = 3.14 loses ~0.05% of every distance
        let legacy = haversine_m_with(&MetricsConfig::legacy(), 0.0, 0.0, 0.0, 1.0);
        let exact = haversine_m(0.0, 0.0, 0.0, 1.0);
        assert!((legacy - 111_138.6).abs() < 1.0, "got {legacy}");
        assert!(exact - legacy > 50.0);
    }

    #[test]
    fn test_symmetry() {
        let pairs = [
            ((51.5074, -0.1278), (48.8566, 2.3522)),
            ((-33.8688, 151.2093), (35.6762, 139.6503)),
            ((0.0, 179.9), (0.0, -179.9)),
        ];
        for ((lat1, lon1), (lat2, lon2)) in pairs {
            let there = haversine_m(lat1, lon1, lat2, lon2);
            let back = haversine_m(lat2, lon2, lat1, lon1);
            assert!((there - back).abs() < 1e-6);
        }
    }

    #[test]
    fn test_same_point_is_zero() {
        assert_eq!(haversine_m(51.5074, -0.1278, 51.5074, -0.1278), 0.0);
        assert_eq!(haversine_m(0.0, 0.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_out_of_range_input_is_not_rejected() {
        let distance = haversine_m(120.0, 0.0, 0.0, 400.0);
        assert!(distance.is_finite());
    }

    #[test]
    fn test_segment_distance_matches_raw_formula() {
        let config = MetricsConfig::default();
        let a = GpsPoint::new(51.5074, -0.1278, "");
        let b = GpsPoint::new(51.5076, -0.1276, "");
        assert_eq!(
            segment_distance_m(&config, &a, &b),
            haversine_m(51.5074, -0.1278, 51.5076, -0.1276)
        );
    }
}
