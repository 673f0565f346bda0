use crate::error::QuadHexError;
use crate::tile::{Tile, TileSet};
use arrow_array::{ArrayRef, Float64Array, RecordBatch, UInt64Array};
use arrow_schema::{DataType, Field, Schema};
use geo_types::Point;
use geoarrow_array::IntoArrow;
use geoarrow_array::array::{PointArray, PolygonArray};
use geoarrow_array::builder::{PointBuilder, PolygonBuilder};
use geoarrow_schema::{Crs, Dimension, Metadata, PointType, PolygonType};
use std::sync::Arc;

/// Name of the geometry column in every tile batch.
pub const GEOMETRY_COLUMN: &str = "geometry";

fn wgs84_metadata() -> Arc<Metadata> {
    let crs = Crs::from_authority_code("EPSG:4326".to_string());
    Arc::new(Metadata::new(crs, None))
}

fn float_column(tiles: &TileSet, f: impl Fn(&Tile) -> f64) -> Float64Array {
    tiles.iter().map(|t| Some(f(t))).collect()
}

/// Converts tilings to Arrow arrays, geometry in WGS84 lon/lat.
pub trait TilesToArrow {
    /// Tile centers as an Arrow PointArray.
    fn to_arrow_points(&self) -> PointArray;
    /// Tile circles as an Arrow PolygonArray.
    fn to_arrow_polygons(&self) -> Result<PolygonArray, QuadHexError>;
    /// RecordBatch with row, col, latitude, longitude, easting, northing and point geometry.
    fn to_record_batch(&self) -> Result<RecordBatch, QuadHexError>;
    /// Same attributes as [`to_record_batch`](Self::to_record_batch), circle outlines as geometry.
    fn to_circle_record_batch(&self) -> Result<RecordBatch, QuadHexError>;
}

impl TilesToArrow for TileSet {
    fn to_arrow_points(&self) -> PointArray {
        let point = PointType::new(Dimension::XY, wgs84_metadata());
        let mut builder = PointBuilder::with_capacity(point, self.len());

        for tile in self {
            builder.push_point(Some(&Point::from(tile.center)));
        }
        builder.finish()
    }

    fn to_arrow_polygons(&self) -> Result<PolygonArray, QuadHexError> {
        let poly = PolygonType::new(Dimension::XY, wgs84_metadata());
        let circles = self.to_circles()?;
        Ok(PolygonBuilder::from_polygons(&circles, poly).finish())
    }

    fn to_record_batch(&self) -> Result<RecordBatch, QuadHexError> {
        let points = self.to_arrow_points();
        let field = points.extension_type().to_field(GEOMETRY_COLUMN, false);
        tile_batch(self, field, Arc::new(points.into_arrow()))
    }

    fn to_circle_record_batch(&self) -> Result<RecordBatch, QuadHexError> {
        let circles = self.to_arrow_polygons()?;
        let field = circles.extension_type().to_field(GEOMETRY_COLUMN, false);
        tile_batch(self, field, Arc::new(circles.into_arrow()))
    }
}

/// Attribute columns shared by every tile batch, followed by `geometry`.
fn tile_batch(
    tiles: &TileSet,
    geometry_field: Field,
    geometry: ArrayRef,
) -> Result<RecordBatch, QuadHexError> {
    let rows: UInt64Array = tiles.iter().map(|t| Some(t.row as u64)).collect();
    let cols: UInt64Array = tiles.iter().map(|t| Some(t.col as u64)).collect();

    let schema = Schema::new(vec![
        Field::new("row", DataType::UInt64, false),
        Field::new("col", DataType::UInt64, false),
        Field::new("latitude", DataType::Float64, false),
        Field::new("longitude", DataType::Float64, false),
        Field::new("easting", DataType::Float64, false),
        Field::new("northing", DataType::Float64, false),
        geometry_field,
    ]);

    RecordBatch::try_new(
        Arc::new(schema),
        vec![
            Arc::new(rows),
            Arc::new(cols),
            Arc::new(float_column(tiles, |t| t.center.lat)),
            Arc::new(float_column(tiles, |t| t.center.lon)),
            Arc::new(float_column(tiles, Tile::easting)),
            Arc::new(float_column(tiles, Tile::northing)),
            geometry,
        ],
    )
    .map_err(|e| QuadHexError::IoError(e.to_string()))
}
