use std::fmt;

/// Which edge of a quadrilateral an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// The `top_left -> top_right` edge.
    Top,
    /// The `bot_left -> bot_right` edge.
    Bottom,
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Edge::Top => write!(f, "top"),
            Edge::Bottom => write!(f, "bottom"),
        }
    }
}

/// Error type for quadhex-rs operations.
#[derive(Debug, PartialEq)]
pub enum QuadHexError {
    /// An edge is vertical in the projected frame, so its gradient is undefined.
    DegenerateEdge(Edge),
    /// A coordinate lies outside the domain of the UTM zone in use.
    ProjectionDomain { lat: f64, lon: f64 },
    /// The tiling configuration is invalid (e.g., non-positive diameter).
    InvalidConfig(String),
    /// PROJ failed to create or apply a transform.
    ProjectionError(String),
    /// File I/O or serialization error.
    IoError(String),
    /// CSV writing error.
    CsvError(String),
    /// Failed to parse geometry from string (GeoJSON or WKT).
    GeometryParseError(String),
}

impl fmt::Display for QuadHexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuadHexError::DegenerateEdge(edge) => {
                write!(f, "Degenerate {} edge: vertical in projected frame", edge)
            }
            QuadHexError::ProjectionDomain { lat, lon } => {
                write!(f, "Coordinate ({}, {}) outside projection domain", lat, lon)
            }
            QuadHexError::InvalidConfig(msg) => write!(f, "Invalid config: {}", msg),
            QuadHexError::ProjectionError(msg) => write!(f, "Projection error: {}", msg),
            QuadHexError::IoError(msg) => write!(f, "IO error: {}", msg),
            QuadHexError::CsvError(msg) => write!(f, "CSV error: {}", msg),
            QuadHexError::GeometryParseError(msg) => write!(f, "Geometry parse error: {}", msg),
        }
    }
}

impl std::error::Error for QuadHexError {}
