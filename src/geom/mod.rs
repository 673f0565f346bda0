mod circle;
mod parse;

pub use circle::{CIRCLE_SEGMENTS, create_circle, create_circle_from_point};
pub use parse::{boundary_from_geojson, boundary_from_wkt, boundary_polygon, parse_boundary};
