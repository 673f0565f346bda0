pub mod arrow;
pub mod csv;
mod geojson;
pub mod parquet;

pub use arrow::TilesToArrow;
pub use csv::{GeometryFormat, TilesToCsv, write_csv};
pub use parquet::{TileGeometry, TilesToGeoParquet, write_geoparquet};
