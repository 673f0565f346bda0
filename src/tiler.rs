use crate::config::TilingConfig;
use crate::coord::{UtmProjection, UtmZone};
use crate::error::QuadHexError;
use crate::grid::{GridParameters, GridPoint, PlanarCorners, above_boundary, candidates};
use crate::quad::Quadrilateral;
use crate::tile::{Tile, TileSet};

/// Tiles a quadrilateral with hexagonally packed circles.
///
/// Construction projects the corners and derives the [`GridParameters`];
/// after that the tiler is read-only and every call yields the same output.
///
/// # Example
/// ```
/// use quadhex_rs::{GeoPoint, Quadrilateral, QuadrilateralHexTiler, TilingConfig};
///
/// # fn main() -> Result<(), quadhex_rs::QuadHexError> {
/// let quad = Quadrilateral::new(
///     GeoPoint::new(43.72, -79.42),
///     GeoPoint::new(43.72, -79.38),
///     GeoPoint::new(43.70, -79.42),
///     GeoPoint::new(43.70, -79.38),
/// );
/// let tiler = QuadrilateralHexTiler::new(&quad, &TilingConfig::new(300.0))?;
/// println!("{} rows x {} cols", tiler.parameters().row_count, tiler.parameters().col_count);
///
/// let tiles = tiler.generate()?;
/// assert!(!tiles.is_empty());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct QuadrilateralHexTiler {
    projection: UtmProjection,
    corners: PlanarCorners,
    params: GridParameters,
}

impl QuadrilateralHexTiler {
    pub fn new(quad: &Quadrilateral, config: &TilingConfig) -> Result<Self, QuadHexError> {
        config.validate()?;

        let zone = match config.utm_zone {
            Some(zone) => zone,
            None => UtmZone::containing(&quad.centroid())?,
        };
        let projection = UtmProjection::new(zone)?;

        let corners = PlanarCorners {
            top_left: projection.geo_to_planar(&quad.top_left)?,
            top_right: projection.geo_to_planar(&quad.top_right)?,
            bot_left: projection.geo_to_planar(&quad.bot_left)?,
            bot_right: projection.geo_to_planar(&quad.bot_right)?,
        };
        let params = GridParameters::derive(&corners, config.circle_diameter)?;

        tracing::debug!(
            zone = %zone,
            circle_diameter = config.circle_diameter,
            "tiler ready"
        );

        Ok(Self {
            projection,
            corners,
            params,
        })
    }

    pub fn parameters(&self) -> &GridParameters {
        &self.params
    }

    pub fn corners(&self) -> &PlanarCorners {
        &self.corners
    }

    pub fn projection(&self) -> &UtmProjection {
        &self.projection
    }

    /// The full grid before boundary filtering.
    pub fn planar_candidates(&self) -> Vec<GridPoint> {
        candidates(&self.params)
    }

    /// Grid points strictly above the bottom edge, still in projected meters.
    pub fn planar_tiles(&self) -> Vec<GridPoint> {
        above_boundary(self.planar_candidates(), &self.params.bottom)
    }

    /// Runs the whole pipeline and converts the survivors back to WGS84.
    pub fn generate(&self) -> Result<TileSet, QuadHexError> {
        let tiles = self
            .planar_tiles()
            .into_iter()
            .map(|p| -> Result<Tile, QuadHexError> {
                Ok(Tile {
                    row: p.row,
                    col: p.col,
                    center: self.projection.planar_to_geo(&p.position)?,
                    planar: p.position,
                })
            })
            .collect::<Result<Vec<_>, QuadHexError>>()?;

        tracing::info!(
            tiles = tiles.len(),
            candidates = self.params.candidate_count(),
            "tiling complete"
        );

        Ok(TileSet::new(
            tiles,
            self.params.circle_diameter,
            self.projection.zone(),
        ))
    }
}

/// Tiles `quad` with circles of `config.circle_diameter` meters.
///
/// Shorthand for [`QuadrilateralHexTiler::new`] followed by
/// [`generate`](QuadrilateralHexTiler::generate).
pub fn generate_tiling(
    quad: &Quadrilateral,
    config: &TilingConfig,
) -> Result<TileSet, QuadHexError> {
    QuadrilateralHexTiler::new(quad, config)?.generate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::{GeoPoint, Hemisphere};
    use crate::error::Edge;
    use crate::grid::distance;

    fn toronto_box() -> Quadrilateral {
        Quadrilateral::new(
            GeoPoint::new(43.72, -79.42),
            GeoPoint::new(43.72, -79.38),
            GeoPoint::new(43.70, -79.42),
            GeoPoint::new(43.70, -79.38),
        )
    }

    /// Tilted roughly 20 degrees, bottom edge parallel to the top.
    fn tilted() -> Quadrilateral {
        Quadrilateral::new(
            GeoPoint::new(43.73, -79.45),
            GeoPoint::new(43.745, -79.40),
            GeoPoint::new(43.70, -79.44),
            GeoPoint::new(43.715, -79.39),
        )
    }

    #[test]
    fn test_toronto_scenario() -> Result<(), QuadHexError> {
        let quad = toronto_box();
        let tiler = QuadrilateralHexTiler::new(&quad, &TilingConfig::new(300.0))?;

        assert_eq!(tiler.projection().zone().number(), 17);
        assert!(tiler.parameters().row_count > 0);
        assert!(tiler.parameters().col_count > 0);

        let tiles = tiler.generate()?;
        assert!(!tiles.is_empty());

        let first = tiles.tiles()[0];
        assert_eq!((first.row, first.col), (0, 0));
        assert!((first.center.lat - quad.top_left.lat).abs() < 1e-6);
        assert!((first.center.lon - quad.top_left.lon).abs() < 1e-6);

        let bottom = tiler.parameters().bottom;
        for tile in &tiles {
            assert!(bottom.is_above(&tile.planar));
        }
        Ok(())
    }

    #[test]
    fn test_output_reprojects_above_bottom_edge() -> Result<(), QuadHexError> {
        let tiler = QuadrilateralHexTiler::new(&tilted(), &TilingConfig::new(250.0))?;
        let bottom = tiler.parameters().bottom;

        for tile in &tiler.generate()? {
            let p = tiler.projection().geo_to_planar(&tile.center)?;
            assert!(p.y() > bottom.y_at(p.x()) - 1e-3);
        }
        Ok(())
    }

    #[test]
    fn test_in_row_spacing_of_output() -> Result<(), QuadHexError> {
        let d = 250.0;
        let tiles = generate_tiling(&tilted(), &TilingConfig::new(d))?;

        let mut pairs = 0;
        for pair in tiles.tiles().windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if a.row == b.row && b.col == a.col + 1 {
                let dist = distance(&a.planar, &b.planar);
                assert!((dist - d).abs() < d * 1e-6);
                pairs += 1;
            }
        }
        assert!(pairs > 0);
        Ok(())
    }

    #[test]
    fn test_first_tile_is_top_left_corner() -> Result<(), QuadHexError> {
        let quad = tilted();
        let tiles = generate_tiling(&quad, &TilingConfig::new(250.0))?;
        let first = tiles.points()[0];
        assert!((first.lat - quad.top_left.lat).abs() < 1e-6);
        assert!((first.lon - quad.top_left.lon).abs() < 1e-6);
        Ok(())
    }

    #[test]
    fn test_deterministic() -> Result<(), QuadHexError> {
        let config = TilingConfig::new(200.0);
        let a = generate_tiling(&tilted(), &config)?;
        let b = generate_tiling(&tilted(), &config)?;
        assert_eq!(a, b);
        Ok(())
    }

    #[test]
    fn test_zero_diameter() {
        let result = generate_tiling(&toronto_box(), &TilingConfig::new(0.0));
        assert!(matches!(result, Err(QuadHexError::InvalidConfig(_))));
    }

    #[test]
    fn test_vertical_top_edge_on_central_meridian() {
        // x = 500000 exactly for both top corners in zone 17
        let quad = Quadrilateral::new(
            GeoPoint::new(43.70, -81.0),
            GeoPoint::new(43.75, -81.0),
            GeoPoint::new(43.65, -81.0),
            GeoPoint::new(43.65, -80.95),
        );
        let result = generate_tiling(&quad, &TilingConfig::new(300.0));
        assert_eq!(result, Err(QuadHexError::DegenerateEdge(Edge::Top)));
    }

    #[test]
    fn test_corner_outside_pinned_zone() -> Result<(), QuadHexError> {
        let config = TilingConfig::new(300.0).utm_zone(UtmZone::new(30, Hemisphere::North)?);
        let result = generate_tiling(&toronto_box(), &config);
        assert!(matches!(result, Err(QuadHexError::ProjectionDomain { .. })));
        Ok(())
    }

    #[test]
    fn test_corner_outside_utm_band() {
        let quad = Quadrilateral::new(
            GeoPoint::new(86.0, 10.0),
            GeoPoint::new(86.0, 11.0),
            GeoPoint::new(85.5, 10.0),
            GeoPoint::new(85.5, 11.0),
        );
        let result = generate_tiling(&quad, &TilingConfig::new(300.0));
        assert!(matches!(result, Err(QuadHexError::ProjectionDomain { .. })));
    }

    #[test]
    fn test_pinned_zone_is_used() -> Result<(), QuadHexError> {
        let zone = UtmZone::new(17, Hemisphere::North)?;
        let tiles = generate_tiling(&toronto_box(), &TilingConfig::new(300.0).utm_zone(zone))?;
        assert_eq!(tiles.zone(), zone);
        Ok(())
    }

    #[test]
    fn test_filtering_removes_candidates_for_slanted_bottom() -> Result<(), QuadHexError> {
        // bottom-right corner pulled north: far-right bottom candidates fall below it
        let quad = Quadrilateral::new(
            GeoPoint::new(43.72, -79.42),
            GeoPoint::new(43.72, -79.38),
            GeoPoint::new(43.70, -79.42),
            GeoPoint::new(43.715, -79.38),
        );
        let tiler = QuadrilateralHexTiler::new(&quad, &TilingConfig::new(300.0))?;
        let candidates = tiler.planar_candidates().len();
        let kept = tiler.planar_tiles().len();
        assert!(kept > 0);
        assert!(kept < candidates);
        assert_eq!(tiler.generate()?.len(), kept);
        Ok(())
    }

    #[test]
    fn test_rows_drifting_past_zone_margin_still_convert() -> Result<(), QuadHexError> {
        // steep parallelogram with its right corners just inside 17N's margin;
        // lower rows shift east past -77.0 before the bottom edge ends them
        let zone = UtmZone::new(17, Hemisphere::North)?;
        let quad = Quadrilateral::new(
            GeoPoint::new(43.60, -77.40),
            GeoPoint::new(43.80, -77.05),
            GeoPoint::new(43.40, -77.40),
            GeoPoint::new(43.60, -77.05),
        );
        for corner in quad.corners() {
            assert!(zone.contains(&corner));
        }

        let tiles = generate_tiling(&quad, &TilingConfig::new(500.0).utm_zone(zone))?;
        assert!(!tiles.is_empty());
        assert!(tiles.iter().any(|t| !zone.contains(&t.center)));

        let circles = tiles.to_circles()?;
        assert_eq!(circles.len(), tiles.len());
        Ok(())
    }

    #[test]
    fn test_retain_within_is_a_subset() -> Result<(), QuadHexError> {
        let quad = tilted();
        let tiles = generate_tiling(&quad, &TilingConfig::new(250.0))?;
        let inside = tiles.retain_within(&quad);
        assert!(inside.len() <= tiles.len());
        for tile in &inside {
            assert!(tiles.tiles().contains(tile));
        }
        Ok(())
    }
}
