use crate::coord::{Coordinate, GeoPoint};
use crate::error::QuadHexError;
use geo_types::Point;
use proj::Proj;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Southern limit of the UTM system in degrees.
const MIN_LATITUDE: f64 = -80.0;
/// Northern limit of the UTM system in degrees.
const MAX_LATITUDE: f64 = 84.0;
/// Width of a standard UTM zone in degrees of longitude.
const ZONE_WIDTH: f64 = 6.0;
/// How far past its own edges a zone is still accepted.
const ZONE_MARGIN: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hemisphere {
    North,
    South,
}

/// A standard 6-degree UTM zone.
///
/// Parses from and prints as `"17N"` / `"33S"`. The Norway and Svalbard
/// exceptions are not modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UtmZone {
    number: u8,
    hemisphere: Hemisphere,
}

impl UtmZone {
    pub fn new(number: u8, hemisphere: Hemisphere) -> Result<Self, QuadHexError> {
        if !(1..=60).contains(&number) {
            return Err(QuadHexError::InvalidConfig(format!(
                "UTM zone number must be 1-60, got {}",
                number
            )));
        }
        Ok(Self { number, hemisphere })
    }

    /// Returns the zone containing the given point.
    pub fn containing(point: &GeoPoint) -> Result<Self, QuadHexError> {
        if !in_utm_band(point) {
            return Err(QuadHexError::ProjectionDomain {
                lat: point.lat,
                lon: point.lon,
            });
        }

        let number = (((point.lon + 180.0) / ZONE_WIDTH).floor() as u8 + 1).min(60);
        let hemisphere = if point.lat >= 0.0 {
            Hemisphere::North
        } else {
            Hemisphere::South
        };
        Self::new(number, hemisphere)
    }

    pub fn number(&self) -> u8 {
        self.number
    }

    pub fn hemisphere(&self) -> Hemisphere {
        self.hemisphere
    }

    /// WGS84 / UTM EPSG code, 326xx in the north and 327xx in the south.
    pub fn epsg_code(&self) -> u32 {
        let base = match self.hemisphere {
            Hemisphere::North => 32600,
            Hemisphere::South => 32700,
        };
        base + self.number as u32
    }

    pub fn central_meridian(&self) -> f64 {
        self.number as f64 * ZONE_WIDTH - 183.0
    }

    /// Whether `point` lies in this zone's projection domain.
    pub fn contains(&self, point: &GeoPoint) -> bool {
        in_utm_band(point)
            && (point.lon - self.central_meridian()).abs() <= ZONE_WIDTH / 2.0 + ZONE_MARGIN
    }
}

fn in_utm_band(point: &GeoPoint) -> bool {
    point.lat.is_finite()
        && point.lon.is_finite()
        && (MIN_LATITUDE..=MAX_LATITUDE).contains(&point.lat)
        && (-180.0..=180.0).contains(&point.lon)
}

impl fmt::Display for UtmZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let h = match self.hemisphere {
            Hemisphere::North => 'N',
            Hemisphere::South => 'S',
        };
        write!(f, "{}{}", self.number, h)
    }
}

impl FromStr for UtmZone {
    type Err = QuadHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || QuadHexError::InvalidConfig(format!("Invalid UTM zone: '{}'", s));

        let (digits, hemisphere) = match s.char_indices().last() {
            Some((i, 'N' | 'n')) => (&s[..i], Hemisphere::North),
            Some((i, 'S' | 's')) => (&s[..i], Hemisphere::South),
            Some(_) => (s, Hemisphere::North),
            None => return Err(invalid()),
        };
        let number: u8 = digits.parse().map_err(|_| invalid())?;
        Self::new(number, hemisphere)
    }
}

impl TryFrom<String> for UtmZone {
    type Error = QuadHexError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<UtmZone> for String {
    fn from(zone: UtmZone) -> Self {
        zone.to_string()
    }
}

/// WGS84 <-> UTM transform pair for a single zone.
///
/// Both PROJ transforms are built once and reused for every point.
pub struct UtmProjection {
    zone: UtmZone,
    forward: Proj,
    inverse: Proj,
}

impl UtmProjection {
    pub fn new(zone: UtmZone) -> Result<Self, QuadHexError> {
        let utm = format!("EPSG:{}", zone.epsg_code());
        let forward = Proj::new_known_crs("EPSG:4326", &utm, None)
            .map_err(|e| QuadHexError::ProjectionError(e.to_string()))?;
        let inverse = Proj::new_known_crs(&utm, "EPSG:4326", None)
            .map_err(|e| QuadHexError::ProjectionError(e.to_string()))?;

        Ok(Self {
            zone,
            forward,
            inverse,
        })
    }

    pub fn zone(&self) -> UtmZone {
        self.zone
    }

    /// Projects a WGS84 point to planar UTM meters (x = easting, y = northing).
    pub fn geo_to_planar(&self, point: &GeoPoint) -> Result<Point<f64>, QuadHexError> {
        if !self.zone.contains(point) {
            return Err(QuadHexError::ProjectionDomain {
                lat: point.lat,
                lon: point.lon,
            });
        }

        let (x, y) = self
            .forward
            .convert((point.x(), point.y()))
            .map_err(|e| QuadHexError::ProjectionError(e.to_string()))?;
        Ok(Point::new(x, y))
    }

    /// Inverse of [`geo_to_planar`](Self::geo_to_planar).
    ///
    /// The zone domain is not checked here: grid points may run past the
    /// corners on the left and right, and those still convert.
    pub fn planar_to_geo<C: Coordinate>(&self, coord: &C) -> Result<GeoPoint, QuadHexError> {
        let (lon, lat) = self
            .inverse
            .convert((coord.x(), coord.y()))
            .map_err(|e| QuadHexError::ProjectionError(e.to_string()))?;
        Ok(GeoPoint::new(lat, lon))
    }
}

impl fmt::Debug for UtmProjection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UtmProjection")
            .field("zone", &self.zone)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TORONTO: GeoPoint = GeoPoint::new(43.72, -79.42);

    #[test]
    fn test_zone_for_toronto() -> Result<(), QuadHexError> {
        let zone = UtmZone::containing(&TORONTO)?;
        assert_eq!(zone.number(), 17);
        assert_eq!(zone.hemisphere(), Hemisphere::North);
        assert_eq!(zone.epsg_code(), 32617);
        assert_eq!(zone.central_meridian(), -81.0);
        Ok(())
    }

    #[test]
    fn test_zone_edges() -> Result<(), QuadHexError> {
        assert_eq!(UtmZone::containing(&GeoPoint::new(0.0, -180.0))?.number(), 1);
        assert_eq!(UtmZone::containing(&GeoPoint::new(0.0, 180.0))?.number(), 60);
        assert_eq!(
            UtmZone::containing(&GeoPoint::new(-33.9, 151.2))?.epsg_code(),
            32756
        );
        Ok(())
    }

    #[test]
    fn test_zone_outside_band() {
        let result = UtmZone::containing(&GeoPoint::new(85.0, 10.0));
        assert!(matches!(result, Err(QuadHexError::ProjectionDomain { .. })));

        let result = UtmZone::containing(&GeoPoint::new(f64::NAN, 10.0));
        assert!(result.is_err());
    }

    #[test]
    fn test_zone_parse_and_display() -> Result<(), QuadHexError> {
        let zone: UtmZone = "17N".parse()?;
        assert_eq!(zone, UtmZone::new(17, Hemisphere::North)?);
        assert_eq!(zone.to_string(), "17N");

        let zone: UtmZone = "56s".parse()?;
        assert_eq!(zone.hemisphere(), Hemisphere::South);

        let zone: UtmZone = "33".parse()?;
        assert_eq!(zone.hemisphere(), Hemisphere::North);

        assert!("0N".parse::<UtmZone>().is_err());
        assert!("61N".parse::<UtmZone>().is_err());
        assert!("".parse::<UtmZone>().is_err());
        assert!("N".parse::<UtmZone>().is_err());
        Ok(())
    }

    #[test]
    fn test_zone_serde_as_string() -> Result<(), QuadHexError> {
        let zone: UtmZone = serde_json::from_str("\"17N\"")
            .map_err(|e| QuadHexError::InvalidConfig(e.to_string()))?;
        assert_eq!(zone.number(), 17);
        assert_eq!(serde_json::to_string(&zone).unwrap(), "\"17N\"");
        Ok(())
    }

    #[test]
    fn test_toronto_projects_into_zone_17() -> Result<(), QuadHexError> {
        let projection = UtmProjection::new(UtmZone::containing(&TORONTO)?)?;
        let planar = projection.geo_to_planar(&TORONTO)?;

        assert!(planar.x() > 620_000.0 && planar.x() < 630_000.0);
        assert!(planar.y() > 4_835_000.0 && planar.y() < 4_850_000.0);
        Ok(())
    }

    #[test]
    fn test_roundtrip() -> Result<(), QuadHexError> {
        let projection = UtmProjection::new(UtmZone::new(17, Hemisphere::North)?)?;

        for point in [
            TORONTO,
            GeoPoint::new(43.70, -79.38),
            GeoPoint::new(0.5, -81.0),
            GeoPoint::new(60.0, -83.9),
        ] {
            let planar = projection.geo_to_planar(&point)?;
            let back = projection.planar_to_geo(&planar)?;
            assert!((point.lat - back.lat).abs() < 1e-6);
            assert!((point.lon - back.lon).abs() < 1e-6);
        }
        Ok(())
    }

    #[test]
    fn test_roundtrip_southern_hemisphere() -> Result<(), QuadHexError> {
        let sydney = GeoPoint::new(-33.87, 151.21);
        let projection = UtmProjection::new(UtmZone::containing(&sydney)?)?;

        let planar = projection.geo_to_planar(&sydney)?;
        assert!(planar.y() > 0.0);

        let back = projection.planar_to_geo(&(planar.x(), planar.y()))?;
        assert!((sydney.lat - back.lat).abs() < 1e-6);
        assert!((sydney.lon - back.lon).abs() < 1e-6);
        Ok(())
    }

    #[test]
    fn test_planar_outside_zone_still_converts() -> Result<(), QuadHexError> {
        let zone = UtmZone::new(17, Hemisphere::North)?;
        let projection = UtmProjection::new(zone)?;

        // roughly 4.5 degrees east of the central meridian at 43.6N
        let point = projection.planar_to_geo(&(862_000.0, 4_835_000.0))?;
        assert!(!zone.contains(&point));
        assert!(point.lon > -77.0 && point.lon < -76.0);
        Ok(())
    }

    #[test]
    fn test_point_outside_zone_is_rejected() -> Result<(), QuadHexError> {
        let projection = UtmProjection::new(UtmZone::new(17, Hemisphere::North)?)?;

        let london = GeoPoint::new(51.5, -0.1);
        let result = projection.geo_to_planar(&london);
        assert!(matches!(result, Err(QuadHexError::ProjectionDomain { .. })));
        Ok(())
    }
}
