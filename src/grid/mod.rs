mod generate;
mod params;

pub use generate::{GridPoint, above_boundary, candidates, row_points};
pub use params::{BoundaryLine, DEGENERATE_EPSILON, GridParameters, MAX_CANDIDATES, PlanarCorners};

#[cfg(test)]
pub(crate) use params::distance;
