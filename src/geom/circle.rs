use geo_types::{Coord, LineString, Point, Polygon};

/// Vertex count used when drawing tile circles.
pub const CIRCLE_SEGMENTS: usize = 32;

/// Approximates a circle as a closed polygon with `segments` vertices.
///
/// Works in whatever planar units the center is given in; tile circles are
/// built in UTM meters and projected back to WGS84 afterwards.
pub fn create_circle(center_x: f64, center_y: f64, radius: f64, segments: usize) -> Polygon<f64> {
    let segments = segments.max(3);
    let mut coords = Vec::with_capacity(segments + 1);

    for i in 0..segments {
        let angle = std::f64::consts::TAU * i as f64 / segments as f64;
        coords.push(Coord {
            x: center_x + radius * angle.cos(),
            y: center_y + radius * angle.sin(),
        });
    }
    coords.push(coords[0]);

    Polygon::new(LineString::from(coords), vec![])
}

pub fn create_circle_from_point(center: &Point<f64>, radius: f64, segments: usize) -> Polygon<f64> {
    create_circle(center.x(), center.y(), radius, segments)
}
