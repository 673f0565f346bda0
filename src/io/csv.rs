use crate::error::QuadHexError;
use crate::tile::TileSet;
use geo_types::Polygon;
use std::fs::File;
use std::path::Path;

/// Output format for tile circle geometries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryFormat {
    /// Well-Known Text format (e.g., "POLYGON((...))")
    Wkt,
    /// GeoJSON format
    GeoJson,
}

fn polygon_to_wkt(polygon: &Polygon<f64>) -> String {
    use wkt::ToWkt;
    polygon.wkt_string()
}

fn polygon_to_geojson(polygon: &Polygon<f64>) -> String {
    let geom = geojson::Geometry::from(polygon);
    geom.to_string()
}

/// Writes one CSV row per tile: `row,col,latitude,longitude,easting,northing`,
/// plus a `geometry` column holding the tile's circle when `geometry` is set.
///
/// # Example
///
/// ```no_run
/// use quadhex_rs::{GeoPoint, GeometryFormat, Quadrilateral, TilingConfig, generate_tiling, write_csv};
///
/// # fn main() -> Result<(), quadhex_rs::QuadHexError> {
/// let quad = Quadrilateral::new(
///     GeoPoint::new(43.72, -79.42),
///     GeoPoint::new(43.72, -79.38),
///     GeoPoint::new(43.70, -79.42),
///     GeoPoint::new(43.70, -79.38),
/// );
/// let tiles = generate_tiling(&quad, &TilingConfig::new(300.0))?;
/// write_csv(&tiles, "tiles.csv", Some(GeometryFormat::Wkt))?;
/// # Ok(())
/// # }
/// ```
pub fn write_csv(
    tiles: &TileSet,
    output_path: impl AsRef<Path>,
    geometry: Option<GeometryFormat>,
) -> Result<(), QuadHexError> {
    let circles = match geometry {
        Some(_) => Some(tiles.to_circles()?),
        None => None,
    };

    let out_file = File::create(output_path).map_err(|e| QuadHexError::IoError(e.to_string()))?;
    let mut writer = csv::Writer::from_writer(out_file);

    let mut header_row = vec!["row", "col", "latitude", "longitude", "easting", "northing"];
    if geometry.is_some() {
        header_row.push("geometry");
    }
    writer
        .write_record(&header_row)
        .map_err(|e| QuadHexError::CsvError(e.to_string()))?;

    for (i, tile) in tiles.iter().enumerate() {
        let mut row = vec![
            tile.row.to_string(),
            tile.col.to_string(),
            tile.center.lat.to_string(),
            tile.center.lon.to_string(),
            tile.easting().to_string(),
            tile.northing().to_string(),
        ];

        if let (Some(format), Some(circles)) = (geometry, &circles) {
            let geom_str = match format {
                GeometryFormat::Wkt => polygon_to_wkt(&circles[i]),
                GeometryFormat::GeoJson => polygon_to_geojson(&circles[i]),
            };
            row.push(geom_str);
        }

        writer
            .write_record(&row)
            .map_err(|e| QuadHexError::CsvError(e.to_string()))?;
    }

    writer
        .flush()
        .map_err(|e| QuadHexError::CsvError(e.to_string()))?;

    Ok(())
}

pub trait TilesToCsv {
    fn to_csv(
        &self,
        output_path: impl AsRef<Path>,
        geometry: Option<GeometryFormat>,
    ) -> Result<(), QuadHexError>;
}

impl TilesToCsv for TileSet {
    fn to_csv(
        &self,
        output_path: impl AsRef<Path>,
        geometry: Option<GeometryFormat>,
    ) -> Result<(), QuadHexError> {
        write_csv(self, output_path, geometry)
    }
}
