use crate::coord::UtmZone;
use crate::error::QuadHexError;
use crate::quad::Quadrilateral;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Height of an equilateral triangle with unit side.
pub(crate) const ROW_SPACING_FACTOR: f64 = 0.866_025_403_784_438_6;

/// Configuration for a tiling run.
///
/// # Example
/// ```
/// use quadhex_rs::TilingConfig;
///
/// let config = TilingConfig::new(300.0).utm_zone("17N".parse().unwrap());
/// assert_eq!(config.circle_radius(), 150.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TilingConfig {
    /// Circle diameter in meters; also the spacing between centers in a row.
    pub circle_diameter: f64,
    /// Pins the projection zone. Derived from the quadrilateral when `None`.
    #[serde(default)]
    pub utm_zone: Option<UtmZone>,
}

impl TilingConfig {
    pub fn new(circle_diameter: f64) -> Self {
        Self {
            circle_diameter,
            utm_zone: None,
        }
    }

    pub fn utm_zone(mut self, zone: UtmZone) -> Self {
        self.utm_zone = Some(zone);
        self
    }

    pub fn validate(&self) -> Result<(), QuadHexError> {
        if !self.circle_diameter.is_finite() || self.circle_diameter <= 0.0 {
            return Err(QuadHexError::InvalidConfig(format!(
                "circle diameter must be positive, got {}",
                self.circle_diameter
            )));
        }
        Ok(())
    }

    /// Distance between adjacent rows: `sqrt(3)/2 * diameter`.
    pub fn row_spacing(&self) -> f64 {
        ROW_SPACING_FACTOR * self.circle_diameter
    }

    /// Radius each circle is drawn with.
    pub fn circle_radius(&self) -> f64 {
        self.circle_diameter / 2.0
    }

    /// Radius for per-point venue searches, wide enough that neighbouring
    /// search areas leave no gaps between rows.
    pub fn search_radius(&self) -> f64 {
        self.row_spacing()
    }
}

/// A complete tiling request, as read from a JSON job file.
///
/// ```json
/// {
///   "quadrilateral": {
///     "top_left":  {"lat": 43.72, "lon": -79.42},
///     "top_right": {"lat": 43.72, "lon": -79.38},
///     "bot_left":  {"lat": 43.70, "lon": -79.42},
///     "bot_right": {"lat": 43.70, "lon": -79.38}
///   },
///   "config": {"circle_diameter": 300.0, "utm_zone": "17N"}
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TilingJob {
    pub quadrilateral: Quadrilateral,
    pub config: TilingConfig,
}

impl TilingJob {
    pub fn from_json_str(s: &str) -> Result<Self, QuadHexError> {
        serde_json::from_str(s).map_err(|e| QuadHexError::InvalidConfig(e.to_string()))
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, QuadHexError> {
        let file = File::open(path).map_err(|e| QuadHexError::IoError(e.to_string()))?;
        serde_json::from_reader(BufReader::new(file))
            .map_err(|e| QuadHexError::InvalidConfig(e.to_string()))
    }
}
