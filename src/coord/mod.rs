mod utm;

pub use utm::{Hemisphere, UtmProjection, UtmZone};

use geo_types::Point;
use serde::{Deserialize, Serialize};

/// Trait for types that can provide x/y coordinates.
///
/// Implemented for `(f64, f64)` tuples, `geo_types::Point<f64>` and [`GeoPoint`].
/// Geographic values use x = longitude and y = latitude.
pub trait Coordinate {
    /// Returns the x-coordinate (easting or longitude).
    fn x(&self) -> f64;
    /// Returns the y-coordinate (northing or latitude).
    fn y(&self) -> f64;
}

impl Coordinate for (f64, f64) {
    fn x(&self) -> f64 {
        self.0
    }
    fn y(&self) -> f64 {
        self.1
    }
}

impl Coordinate for Point<f64> {
    fn x(&self) -> f64 {
        Point::x(*self)
    }
    fn y(&self) -> f64 {
        Point::y(*self)
    }
}

/// A WGS84 position in degrees.
///
/// Constructed latitude first, the way corners are usually quoted:
///
/// ```
/// use quadhex_rs::GeoPoint;
///
/// let top_left = GeoPoint::new(43.72, -79.42);
/// assert_eq!(top_left.lon, -79.42);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl Coordinate for GeoPoint {
    fn x(&self) -> f64 {
        self.lon
    }
    fn y(&self) -> f64 {
        self.lat
    }
}

impl From<GeoPoint> for Point<f64> {
    fn from(p: GeoPoint) -> Self {
        Point::new(p.lon, p.lat)
    }
}

impl From<Point<f64>> for GeoPoint {
    fn from(p: Point<f64>) -> Self {
        GeoPoint::new(p.y(), p.x())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_trait_tuple() {
        let tuple = (100.0, 200.0);
        assert_eq!(tuple.x(), 100.0);
        assert_eq!(tuple.y(), 200.0);
    }

    #[test]
    fn test_coordinate_trait_geo_point_is_lon_lat() {
        let p = GeoPoint::new(43.72, -79.42);
        assert_eq!(p.x(), -79.42);
        assert_eq!(p.y(), 43.72);
    }

    #[test]
    fn test_geo_point_to_point_and_back() {
        let p = GeoPoint::new(43.70, -79.38);
        let pt: Point<f64> = p.into();
        assert_eq!(pt.x(), -79.38);
        assert_eq!(GeoPoint::from(pt), p);
    }

    #[test]
    fn test_geo_point_serde() {
        let p: GeoPoint = serde_json::from_str(r#"{"lat":43.7,"lon":-79.4}"#).unwrap();
        assert_eq!(p, GeoPoint::new(43.7, -79.4));
    }
}
