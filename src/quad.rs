use crate::coord::GeoPoint;
use crate::error::QuadHexError;
use crate::geom::{boundary_from_geojson, boundary_from_wkt, boundary_polygon, parse_boundary};
use geo::Centroid;
use geo_types::{Coord, Geometry, LineString, MultiPoint, Point, Polygon};
use serde::{Deserialize, Serialize};

/// The region to tile, given by its four geographic corners.
///
/// The top edge (`top_left -> top_right`) orients the rows, and only the
/// bottom edge (`bot_left -> bot_right`) bounds them. Convexity and
/// parallelism of the edges are not checked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quadrilateral {
    pub top_left: GeoPoint,
    pub top_right: GeoPoint,
    pub bot_left: GeoPoint,
    pub bot_right: GeoPoint,
}

impl Quadrilateral {
    pub fn new(
        top_left: GeoPoint,
        top_right: GeoPoint,
        bot_left: GeoPoint,
        bot_right: GeoPoint,
    ) -> Self {
        Self {
            top_left,
            top_right,
            bot_left,
            bot_right,
        }
    }

    /// Corners in `[top_left, top_right, bot_left, bot_right]` order.
    pub fn corners(&self) -> [GeoPoint; 4] {
        [self.top_left, self.top_right, self.bot_left, self.bot_right]
    }

    /// Mean of the four corners.
    pub fn centroid(&self) -> GeoPoint {
        let points = MultiPoint::new(self.corners().into_iter().map(Point::from).collect());
        // only an empty MultiPoint has no centroid
        points
            .centroid()
            .map(GeoPoint::from)
            .unwrap_or(self.top_left)
    }

    /// Closed boundary ring: top_right, top_left, bot_left, bot_right, top_right.
    ///
    /// Coordinates are lon/lat (x/y), ready for map overlays.
    pub fn boundary(&self) -> LineString<f64> {
        [
            self.top_right,
            self.top_left,
            self.bot_left,
            self.bot_right,
            self.top_right,
        ]
        .into_iter()
        .map(|p| Coord { x: p.lon, y: p.lat })
        .collect()
    }

    pub fn to_polygon(&self) -> Polygon<f64> {
        Polygon::new(self.boundary(), vec![])
    }

    /// Reads the corners from a polygon whose exterior ring runs
    /// top_right, top_left, bot_left, bot_right (the order of [`boundary`](Self::boundary)).
    pub fn from_polygon(polygon: &Polygon<f64>) -> Result<Self, QuadHexError> {
        let mut coords: Vec<Coord<f64>> = polygon.exterior().coords().copied().collect();
        if coords.len() > 1 && coords.first() == coords.last() {
            coords.pop();
        }
        if coords.len() != 4 {
            return Err(QuadHexError::GeometryParseError(format!(
                "Quadrilateral needs 4 corners, got {}",
                coords.len()
            )));
        }

        let corner = |c: Coord<f64>| GeoPoint::new(c.y, c.x);
        Ok(Self {
            top_right: corner(coords[0]),
            top_left: corner(coords[1]),
            bot_left: corner(coords[2]),
            bot_right: corner(coords[3]),
        })
    }

    pub fn from_geometry(geometry: Geometry<f64>) -> Result<Self, QuadHexError> {
        Self::from_polygon(&boundary_polygon(geometry)?)
    }

    /// Parses a WKT or GeoJSON polygon, auto-detecting the format.
    ///
    /// # Example
    /// ```
    /// use quadhex_rs::Quadrilateral;
    ///
    /// # fn main() -> Result<(), quadhex_rs::QuadHexError> {
    /// let quad = Quadrilateral::parse(
    ///     "POLYGON((-79.38 43.72,-79.42 43.72,-79.42 43.70,-79.38 43.70,-79.38 43.72))",
    /// )?;
    /// assert_eq!(quad.top_left.lon, -79.42);
    /// # Ok(())
    /// # }
    /// ```
    pub fn parse(s: &str) -> Result<Self, QuadHexError> {
        Self::from_polygon(&parse_boundary(s)?)
    }

    pub fn from_wkt(s: &str) -> Result<Self, QuadHexError> {
        Self::from_polygon(&boundary_from_wkt(s)?)
    }

    /// Accepts a bare geometry, a feature, or a one-feature collection.
    pub fn from_geojson(s: &str) -> Result<Self, QuadHexError> {
        Self::from_polygon(&boundary_from_geojson(s)?)
    }
}
