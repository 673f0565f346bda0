use crate::coord::{GeoPoint, UtmProjection, UtmZone};
use crate::error::QuadHexError;
use crate::geom::{CIRCLE_SEGMENTS, create_circle_from_point};
use crate::quad::Quadrilateral;
use geo::Contains;
use geo_types::{Coord, LineString, Point, Polygon};

/// One circle of the tiling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    /// Row index; row 0 runs along the top edge.
    pub row: usize,
    /// Column index within the row, counted from the left edge.
    pub col: usize,
    /// Circle center in WGS84.
    pub center: GeoPoint,
    /// Circle center in the projected UTM frame (meters).
    pub planar: Point<f64>,
}

impl Tile {
    pub fn easting(&self) -> f64 {
        self.planar.x()
    }

    pub fn northing(&self) -> f64 {
        self.planar.y()
    }
}

/// The ordered output of a tiling run.
///
/// Tiles are kept in generation order (row by row, left to right) minus
/// the ones dropped by the bottom boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct TileSet {
    tiles: Vec<Tile>,
    circle_diameter: f64,
    zone: UtmZone,
}

impl TileSet {
    pub(crate) fn new(tiles: Vec<Tile>, circle_diameter: f64, zone: UtmZone) -> Self {
        Self {
            tiles,
            circle_diameter,
            zone,
        }
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    pub fn circle_diameter(&self) -> f64 {
        self.circle_diameter
    }

    /// The UTM zone the tiling was computed in.
    pub fn zone(&self) -> UtmZone {
        self.zone
    }

    /// Tile centers only, in order.
    pub fn points(&self) -> Vec<GeoPoint> {
        self.tiles.iter().map(|t| t.center).collect()
    }

    /// Circle outlines (radius `circle_diameter / 2`) in WGS84, lon/lat order.
    pub fn to_circles(&self) -> Result<Vec<Polygon<f64>>, QuadHexError> {
        let projection = UtmProjection::new(self.zone)?;
        let radius = self.circle_diameter / 2.0;

        self.tiles
            .iter()
            .map(|tile| -> Result<Polygon<f64>, QuadHexError> {
                let planar = create_circle_from_point(&tile.planar, radius, CIRCLE_SEGMENTS);
                let ring = planar
                    .exterior()
                    .coords()
                    .map(|c| {
                        projection
                            .planar_to_geo(&(c.x, c.y))
                            .map(|p| Coord { x: p.lon, y: p.lat })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Polygon::new(LineString::from(ring), vec![]))
            })
            .collect()
    }

    /// Drops tiles whose center is not strictly inside `quad`.
    ///
    /// Generation only clips against the bottom edge; use this when the
    /// left and right edges must be respected too.
    pub fn retain_within(&self, quad: &Quadrilateral) -> TileSet {
        let polygon = quad.to_polygon();
        let tiles = self
            .tiles
            .iter()
            .filter(|t| polygon.contains(&Point::from(t.center)))
            .copied()
            .collect();
        TileSet::new(tiles, self.circle_diameter, self.zone)
    }

    pub fn filter<F>(&self, predicate: F) -> Vec<&Tile>
    where
        F: Fn(&Tile) -> bool,
    {
        self.tiles.iter().filter(|tile| predicate(tile)).collect()
    }
}

impl<'a> IntoIterator for &'a TileSet {
    type Item = &'a Tile;
    type IntoIter = std::slice::Iter<'a, Tile>;

    fn into_iter(self) -> Self::IntoIter {
        self.tiles.iter()
    }
}
