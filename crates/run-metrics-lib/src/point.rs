//! Track point storage

/// A single timestamped GPS fix
///
/// Coordinates are in decimal degrees. The timestamp is kept in its textual
/// form (`YYYY-MM-DDTHH:MM:SS.mmm`) and only parsed when time differences are
/// needed, so it can be carried into reports unmodified.
#[derive(Debug, Clone, PartialEq)]
pub struct GpsPoint {
    latitude: f64,
    longitude: f64,
    timestamp: String,
}

impl GpsPoint {
    /// Create a new point from latitude and longitude in degrees
    pub fn new(latitude: f64, longitude: f64, timestamp: impl Into<String>) -> Self {
        Self {
            latitude,
            longitude,
            timestamp: timestamp.into(),
        }
    }

    /// Create a point from a `geo` point (x = longitude, y = latitude)
    pub fn from_geo(point: geo::Point<f64>, timestamp: impl Into<String>) -> Self {
        Self::new(point.y(), point.x(), timestamp)
    }

    #[inline]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    #[inline]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    #[inline]
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Position as a `geo` point (x = longitude, y = latitude)
    #[inline]
    pub fn to_geo(&self) -> geo::Point<f64> {
        geo::Point::new(self.longitude, self.latitude)
    }
}
