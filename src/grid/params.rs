use crate::config::ROW_SPACING_FACTOR;
use crate::error::{Edge, QuadHexError};
use geo_types::{Coord, Point};

/// Smallest x-delta (meters) an edge may span before it counts as vertical.
pub const DEGENERATE_EPSILON: f64 = 1e-6;

/// Largest grid (rows times columns) a single tiling may allocate.
pub const MAX_CANDIDATES: usize = 50_000_000;

/// The four corners of the region in projected meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanarCorners {
    pub top_left: Point<f64>,
    pub top_right: Point<f64>,
    pub bot_left: Point<f64>,
    pub bot_right: Point<f64>,
}

/// Non-vertical line `y = gradient * x + bias` in projected meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryLine {
    pub gradient: f64,
    pub bias: f64,
}

impl BoundaryLine {
    /// Line through `a` and `b`. Fails when the two share an x-coordinate.
    pub fn through(a: &Point<f64>, b: &Point<f64>, edge: Edge) -> Result<Self, QuadHexError> {
        let gradient = gradient(a, b, edge)?;
        Ok(Self {
            gradient,
            bias: b.y() - gradient * b.x(),
        })
    }

    pub fn y_at(&self, x: f64) -> f64 {
        self.gradient * x + self.bias
    }

    /// Strictly above the line; points on it are rejected.
    pub fn is_above(&self, point: &Point<f64>) -> bool {
        point.y() > self.y_at(point.x())
    }
}

fn gradient(a: &Point<f64>, b: &Point<f64>, edge: Edge) -> Result<f64, QuadHexError> {
    let dx = b.x() - a.x();
    if dx.is_nan() || dx.abs() < DEGENERATE_EPSILON {
        return Err(QuadHexError::DegenerateEdge(edge));
    }
    Ok((b.y() - a.y()) / dx)
}

/// Positive x-component of a `length`-long step along a line of the given
/// gradient (the y-component is `gradient` times this).
fn decompose(length: f64, gradient: f64) -> f64 {
    (length * length / (1.0 + gradient * gradient)).sqrt()
}

/// Everything the grid needs, derived once from the projected corners.
///
/// Rows run parallel to the top edge; successive rows step away from it
/// along the perpendicular, towards the bottom edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridParameters {
    /// First grid point, the projected top-left corner.
    pub origin: Point<f64>,
    pub circle_diameter: f64,
    pub top_gradient: f64,
    pub vertical_gradient: f64,
    /// Offset between neighbours in a row, `circle_diameter` long.
    pub horizontal_step: Coord<f64>,
    /// Offset between row origins (subtracted), `row_spacing` long.
    pub vertical_step: Coord<f64>,
    pub row_spacing: f64,
    pub max_horizontal_extent: f64,
    pub max_vertical_extent: f64,
    pub row_count: usize,
    pub col_count: usize,
    pub bottom: BoundaryLine,
}

impl GridParameters {
    pub fn derive(corners: &PlanarCorners, circle_diameter: f64) -> Result<Self, QuadHexError> {
        if !circle_diameter.is_finite() || circle_diameter <= 0.0 {
            return Err(QuadHexError::InvalidConfig(format!(
                "circle diameter must be positive, got {}",
                circle_diameter
            )));
        }

        let top_gradient = gradient(&corners.top_left, &corners.top_right, Edge::Top)?;
        let bottom = BoundaryLine::through(&corners.bot_left, &corners.bot_right, Edge::Bottom)?;
        let vertical_gradient = -top_gradient;

        let hx = decompose(circle_diameter, top_gradient);
        let horizontal_step = Coord {
            x: hx,
            y: top_gradient * hx,
        };

        let row_spacing = ROW_SPACING_FACTOR * circle_diameter;
        let vy = decompose(row_spacing, vertical_gradient);
        let vertical_step = Coord {
            x: vertical_gradient * vy,
            y: vy,
        };

        let max_horizontal_extent = distance(&corners.top_left, &corners.top_right);
        let max_vertical_extent = distance(&corners.top_left, &corners.bot_left);

        // floor leaves up to one row/column of the far edges uncovered
        let rows = (max_vertical_extent / row_spacing).floor();
        let cols = (max_horizontal_extent / circle_diameter).floor();
        if rows * cols > MAX_CANDIDATES as f64 {
            return Err(QuadHexError::InvalidConfig(format!(
                "circle diameter {} m gives a {} x {} grid, more than {} candidates",
                circle_diameter, rows, cols, MAX_CANDIDATES
            )));
        }
        let row_count = rows as usize;
        let col_count = cols as usize;

        tracing::debug!(
            top_gradient,
            bottom_gradient = bottom.gradient,
            row_count,
            col_count,
            "derived grid parameters"
        );

        Ok(Self {
            origin: corners.top_left,
            circle_diameter,
            top_gradient,
            vertical_gradient,
            horizontal_step,
            vertical_step,
            row_spacing,
            max_horizontal_extent,
            max_vertical_extent,
            row_count,
            col_count,
            bottom,
        })
    }

    /// First point of `row`, shifted half a step along the row when `row` is odd.
    pub fn row_origin(&self, row: usize) -> Point<f64> {
        let i = row as f64;
        let mut x = self.origin.x() - i * self.vertical_step.x;
        let mut y = self.origin.y() - i * self.vertical_step.y;
        if row % 2 == 1 {
            x += self.horizontal_step.x / 2.0;
            y += self.horizontal_step.y / 2.0;
        }
        Point::new(x, y)
    }

    pub fn point_at(&self, row: usize, col: usize) -> Point<f64> {
        let origin = self.row_origin(row);
        let j = col as f64;
        Point::new(
            origin.x() + j * self.horizontal_step.x,
            origin.y() + j * self.horizontal_step.y,
        )
    }

    /// Upper bound on the number of tiles before boundary filtering.
    pub fn candidate_count(&self) -> usize {
        self.row_count.saturating_mul(self.col_count)
    }
}

pub(crate) fn distance(a: &Point<f64>, b: &Point<f64>) -> f64 {
    (a.x() - b.x()).hypot(a.y() - b.y())
}
