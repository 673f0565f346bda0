use crate::grid::params::{BoundaryLine, GridParameters};
use geo_types::Point;
use rayon::prelude::*;

/// A candidate circle center with its grid indices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPoint {
    pub row: usize,
    pub col: usize,
    pub position: Point<f64>,
}

/// All points of a single row, in column order.
pub fn row_points(params: &GridParameters, row: usize) -> Vec<GridPoint> {
    (0..params.col_count)
        .map(|col| GridPoint {
            row,
            col,
            position: params.point_at(row, col),
        })
        .collect()
}

/// Every candidate point in row-major order.
///
/// Rows are built in parallel and re-joined in row order, so the output is
/// identical to a sequential walk.
pub fn candidates(params: &GridParameters) -> Vec<GridPoint> {
    let rows: Vec<Vec<GridPoint>> = (0..params.row_count)
        .into_par_iter()
        .map(|row| row_points(params, row))
        .collect();

    let mut points = Vec::with_capacity(params.candidate_count());
    for row in rows {
        points.extend(row);
    }
    points
}

/// Keeps the points strictly above `line`, preserving order.
pub fn above_boundary(points: Vec<GridPoint>, line: &BoundaryLine) -> Vec<GridPoint> {
    let before = points.len();
    let kept: Vec<GridPoint> = points
        .into_iter()
        .filter(|p| line.is_above(&p.position))
        .collect();

    tracing::trace!(
        dropped = before - kept.len(),
        kept = kept.len(),
        "bottom boundary filter"
    );
    kept
}
