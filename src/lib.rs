//! # quadhex-rs
//!
//! Covers a quadrilateral region with hexagonally packed circles and returns
//! the circle centers in WGS84. Rows run parallel to the region's top edge,
//! odd rows are shifted by half a circle, and only the bottom edge clips the
//! grid.
//!
//! ### 1. `generate_tiling` - One Call
//!
//! ```
//! use quadhex_rs::{GeoPoint, Quadrilateral, TilingConfig, generate_tiling};
//!
//! # fn main() -> Result<(), quadhex_rs::QuadHexError> {
//! let quad = Quadrilateral::new(
//!     GeoPoint::new(43.72, -79.42), // top left
//!     GeoPoint::new(43.72, -79.38), // top right
//!     GeoPoint::new(43.70, -79.42), // bottom left
//!     GeoPoint::new(43.70, -79.38), // bottom right
//! );
//! let tiles = generate_tiling(&quad, &TilingConfig::new(300.0))?;
//! for p in tiles.points() {
//!     println!("{}, {}", p.lat, p.lon);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ### 2. `QuadrilateralHexTiler` - Stage by Stage
//!
//! The tiler exposes its [`GridParameters`] and the planar grid before and
//! after the bottom-edge filter.
//!
//! ### 3. Exports
//!
//! A [`TileSet`] can be written out for mapping or per-point search tools:
//!
//! ```no_run
//! use quadhex_rs::{GeometryFormat, TileGeometry, TilesToCsv, TilesToGeoParquet, write_geoparquet};
//! # use quadhex_rs::{GeoPoint, Quadrilateral, TilingConfig, generate_tiling};
//! # fn main() -> Result<(), quadhex_rs::QuadHexError> {
//! # let quad = Quadrilateral::parse(
//! #     "POLYGON((-79.38 43.72,-79.42 43.72,-79.42 43.70,-79.38 43.70,-79.38 43.72))",
//! # )?;
//! # let tiles = generate_tiling(&quad, &TilingConfig::new(300.0))?;
//! tiles.to_csv("tiles.csv", Some(GeometryFormat::Wkt))?;
//! tiles.write_geojson("tiles.geojson")?;
//! tiles.to_geoparquet("tiles.parquet")?;
//! write_geoparquet(&tiles, "circles.parquet", TileGeometry::Circles)?;
//! # Ok(())
//! # }
//! ```
//!

pub mod config;
pub mod coord;
pub mod error;
pub mod geom;
pub mod grid;
pub mod io;
pub mod quad;
pub mod tile;
pub mod tiler;

pub use config::{TilingConfig, TilingJob};
pub use coord::{Coordinate, GeoPoint, Hemisphere, UtmProjection, UtmZone};
pub use error::{Edge, QuadHexError};
pub use geom::{create_circle, parse_boundary};
pub use grid::{BoundaryLine, GridParameters, GridPoint, PlanarCorners};
pub use io::{
    GeometryFormat, TileGeometry, TilesToArrow, TilesToCsv, TilesToGeoParquet, write_csv,
    write_geoparquet,
};
pub use quad::Quadrilateral;
pub use tile::{Tile, TileSet};
pub use tiler::{QuadrilateralHexTiler, generate_tiling};

pub use geo_types;
pub use geoarrow_array;
pub use geoarrow_schema;
pub use geoparquet;
