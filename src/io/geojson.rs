use crate::error::QuadHexError;
use crate::tile::TileSet;
use geo_types::{MultiPoint, Point};
use geojson::{Feature, FeatureCollection, Geometry, Value};
use std::fs;
use std::path::Path;
use wkt::ToWkt;

impl TileSet {
    /// One Point feature per tile, carrying `row`, `col` and `radius_m`.
    pub fn to_geojson(&self) -> FeatureCollection {
        let radius = self.circle_diameter() / 2.0;
        let features = self
            .iter()
            .map(|tile| {
                let point = Point::from(tile.center);
                let mut feature = Feature::from(Geometry::new(Value::from(&point)));
                feature.set_property("row", tile.row);
                feature.set_property("col", tile.col);
                feature.set_property("radius_m", radius);
                feature
            })
            .collect();

        FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        }
    }

    pub fn write_geojson(&self, path: impl AsRef<Path>) -> Result<(), QuadHexError> {
        fs::write(path, self.to_geojson().to_string())
            .map_err(|e| QuadHexError::IoError(e.to_string()))
    }

    /// Tile centers as a WKT `MULTIPOINT`.
    pub fn to_wkt(&self) -> String {
        let points: MultiPoint<f64> = self.iter().map(|t| Point::from(t.center)).collect();
        points.wkt_string()
    }

    pub fn write_wkt(&self, path: impl AsRef<Path>) -> Result<(), QuadHexError> {
        fs::write(path, self.to_wkt()).map_err(|e| QuadHexError::IoError(e.to_string()))
    }
}
