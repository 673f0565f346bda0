use crate::error::QuadHexError;
use geo_types::{Geometry, Polygon};
use geojson::GeoJson;
use std::str::FromStr;
use wkt::Wkt;

fn parse_error(msg: impl Into<String>) -> QuadHexError {
    QuadHexError::GeometryParseError(msg.into())
}

/// Reads a region boundary from WKT or GeoJSON text.
///
/// Text starting with `{` is read as GeoJSON, anything else as WKT.
pub fn parse_boundary(s: &str) -> Result<Polygon<f64>, QuadHexError> {
    let trimmed = s.trim();
    if trimmed.starts_with('{') {
        boundary_from_geojson(trimmed)
    } else {
        boundary_from_wkt(trimmed)
    }
}

/// Reads a boundary from a GeoJSON geometry, a feature, or a collection
/// holding exactly one feature (the shape map overlays are usually saved in).
pub fn boundary_from_geojson(s: &str) -> Result<Polygon<f64>, QuadHexError> {
    let geojson: GeoJson = s
        .parse()
        .map_err(|e: geojson::Error| parse_error(e.to_string()))?;

    let geometry = match geojson {
        GeoJson::Geometry(geometry) => geometry,
        GeoJson::Feature(feature) => feature
            .geometry
            .ok_or_else(|| parse_error("boundary feature has no geometry"))?,
        GeoJson::FeatureCollection(collection) => {
            let count = collection.features.len();
            let feature = match <[geojson::Feature; 1]>::try_from(collection.features) {
                Ok([feature]) => feature,
                Err(_) => {
                    return Err(parse_error(format!(
                        "boundary collection must hold one feature, got {}",
                        count
                    )));
                }
            };
            feature
                .geometry
                .ok_or_else(|| parse_error("boundary feature has no geometry"))?
        }
    };

    let geometry = Geometry::try_from(geometry).map_err(|e| parse_error(e.to_string()))?;
    boundary_polygon(geometry)
}

/// Reads a boundary from a WKT `POLYGON`, closed `LINESTRING` or
/// single-member `MULTIPOLYGON`.
pub fn boundary_from_wkt(s: &str) -> Result<Polygon<f64>, QuadHexError> {
    let wkt = Wkt::<f64>::from_str(s).map_err(|e| parse_error(e.to_string()))?;
    let geometry: Geometry<f64> = wkt
        .try_into()
        .map_err(|_| parse_error("unsupported WKT geometry"))?;
    boundary_polygon(geometry)
}

/// Narrows a geometry to the single ring a region boundary needs.
pub fn boundary_polygon(geometry: Geometry<f64>) -> Result<Polygon<f64>, QuadHexError> {
    match geometry {
        Geometry::Polygon(polygon) => Ok(polygon),
        Geometry::LineString(ring) if ring.is_closed() => Ok(Polygon::new(ring, vec![])),
        Geometry::LineString(_) => Err(parse_error("boundary line string is not closed")),
        Geometry::MultiPolygon(multi) => {
            let count = multi.0.len();
            match <[Polygon<f64>; 1]>::try_from(multi.0) {
                Ok([polygon]) => Ok(polygon),
                Err(_) => Err(parse_error(format!(
                    "boundary multipolygon must hold one polygon, got {}",
                    count
                ))),
            }
        }
        other => Err(parse_error(format!(
            "boundary must be a Polygon, got {}",
            geometry_name(&other)
        ))),
    }
}

fn geometry_name(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}
