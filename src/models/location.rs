//! Query point model

use geo_types::Coord;
use serde::{Deserialize, Serialize};

/// A WGS84 query point in decimal degrees
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a new point
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Both components are finite numbers
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    /// Coordinate in geometry order (x = longitude, y = latitude)
    #[must_use]
    pub fn coord(&self) -> Coord<f64> {
        Coord {
            x: self.longitude,
            y: self.latitude,
        }
    }

    /// Format point as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

impl From<Coord<f64>> for GeoPoint {
    fn from(coord: Coord<f64>) -> Self {
        Self::new(coord.y, coord.x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_validity() {
        assert!(GeoPoint::new(40.5, -111.5).is_valid());
        assert!(!GeoPoint::new(f64::NAN, -111.5).is_valid());
        assert!(!GeoPoint::new(40.5, f64::INFINITY).is_valid());
    }

    #[test]
    fn test_coord_axis_order() {
        let point = GeoPoint::new(40.5, -111.5);
        let coord = point.coord();
        assert_eq!(coord.x, -111.5);
        assert_eq!(coord.y, 40.5);
        assert_eq!(GeoPoint::from(coord), point);
        assert_eq!(point.format_coordinates(), "40.5000, -111.5000");
    }
}
