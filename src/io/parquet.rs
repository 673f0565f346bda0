use crate::error::QuadHexError;
use crate::io::arrow::{GEOMETRY_COLUMN, TilesToArrow};
use crate::tile::TileSet;
use geoparquet::writer::{
    GeoParquetRecordBatchEncoder, GeoParquetWriterEncoding, GeoParquetWriterOptionsBuilder,
};
use parquet::arrow::ArrowWriter;
use parquet::file::metadata::KeyValue;
use std::fs::File;
use std::path::Path;

/// Which shape goes in the GeoParquet geometry column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileGeometry {
    /// Tile centers as points.
    Centers,
    /// Circle outlines as polygons, with a `bbox` covering column.
    Circles,
}

fn io_error(e: impl ToString) -> QuadHexError {
    QuadHexError::IoError(e.to_string())
}

/// Writes a tiling to a WKB-encoded GeoParquet file.
///
/// Geometry is lon/lat WGS84, the GeoParquet default CRS. The UTM zone and
/// circle diameter the tiling was computed with are stored as file
/// metadata under `quadhex:utm_zone` and `quadhex:circle_diameter`.
pub fn write_geoparquet(
    tiles: &TileSet,
    path: impl AsRef<Path>,
    geometry: TileGeometry,
) -> Result<(), QuadHexError> {
    let batch = match geometry {
        TileGeometry::Centers => tiles.to_record_batch()?,
        TileGeometry::Circles => tiles.to_circle_record_batch()?,
    };

    let options = GeoParquetWriterOptionsBuilder::default()
        .set_primary_column(GEOMETRY_COLUMN.to_string())
        .set_encoding(GeoParquetWriterEncoding::WKB)
        .set_generate_covering(geometry == TileGeometry::Circles)
        .build();
    let mut encoder =
        GeoParquetRecordBatchEncoder::try_new(&batch.schema(), &options).map_err(io_error)?;

    let file = File::create(path).map_err(io_error)?;
    let mut writer =
        ArrowWriter::try_new(file, encoder.target_schema(), None).map_err(io_error)?;
    writer
        .write(&encoder.encode_record_batch(&batch).map_err(io_error)?)
        .map_err(io_error)?;

    writer.append_key_value_metadata(encoder.into_keyvalue().map_err(io_error)?);
    writer.append_key_value_metadata(KeyValue::new(
        "quadhex:utm_zone".to_string(),
        tiles.zone().to_string(),
    ));
    writer.append_key_value_metadata(KeyValue::new(
        "quadhex:circle_diameter".to_string(),
        tiles.circle_diameter().to_string(),
    ));
    writer.finish().map_err(io_error)?;

    tracing::debug!(rows = batch.num_rows(), ?geometry, "wrote geoparquet");
    Ok(())
}

pub trait TilesToGeoParquet {
    /// Writes the tile centers and attributes to a GeoParquet file.
    fn to_geoparquet(&self, path: impl AsRef<Path>) -> Result<(), QuadHexError>;
}

impl TilesToGeoParquet for TileSet {
    fn to_geoparquet(&self, path: impl AsRef<Path>) -> Result<(), QuadHexError> {
        write_geoparquet(self, path, TileGeometry::Centers)
    }
}
