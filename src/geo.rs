//! Coarsening of coordinates into anonymized grid cells.
//!
//! The assembler only depends on [`GridLocator`]; [`PrecisionGrid`] is the
//! default decimal-truncation locator.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::BoxError;

/// Largest supported number of decimal digits (about 11 cm at the equator).
pub const MAX_PRECISION: u8 = 6;

/// Default number of decimal digits kept (about 1.1 km at the equator).
pub const DEFAULT_PRECISION: u8 = 2;

/// Errors raised by the default locator.
#[derive(Debug, thiserror::Error)]
pub enum GeoError {
    /// A coordinate was not finite or outside its valid range.
    #[error("{axis} {value} is out of range")]
    InvalidCoordinate {
        /// `latitude` or `longitude`.
        axis: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// The precision level exceeds [`MAX_PRECISION`].
    #[error("precision {0} exceeds the maximum of {MAX_PRECISION}")]
    PrecisionOutOfRange(u8),
}

/// Number of decimal digits retained when snapping a coordinate to the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PrecisionLevel(u8);

impl PrecisionLevel {
    /// Creates a precision level.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::PrecisionOutOfRange`] above [`MAX_PRECISION`].
    pub fn new(digits: u8) -> Result<Self, GeoError> {
        if digits > MAX_PRECISION {
            return Err(GeoError::PrecisionOutOfRange(digits));
        }
        Ok(Self(digits))
    }

    /// Returns the number of decimal digits.
    pub fn digits(self) -> u8 {
        self.0
    }
}

impl Default for PrecisionLevel {
    fn default() -> Self {
        Self(DEFAULT_PRECISION)
    }
}

impl TryFrom<u8> for PrecisionLevel {
    type Error = GeoError;

    fn try_from(digits: u8) -> Result<Self, Self::Error> {
        Self::new(digits)
    }
}

impl From<PrecisionLevel> for u8 {
    fn from(level: PrecisionLevel) -> Self {
        level.0
    }
}

/// Anonymized location: a sequence of grid coordinates.
///
/// The byte encoding is every value as 8-byte big-endian, concatenated. The
/// string form is the values space-separated inside brackets, e.g. `[3781 -12248]`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GridCell(Vec<i64>);

impl GridCell {
    /// Wraps raw grid coordinates.
    pub fn new(values: Vec<i64>) -> Self {
        Self(values)
    }

    /// Returns the grid coordinates.
    pub fn values(&self) -> &[i64] {
        &self.0
    }

    /// Reports whether the cell holds no coordinates.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Encodes the cell as concatenated big-endian `i64` values.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.0.iter().flat_map(|v| v.to_be_bytes()).collect()
    }
}

impl fmt::Display for GridCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{value}")?;
        }
        f.write_str("]")
    }
}

/// Source of precision levels and grid cells.
pub trait GridLocator {
    /// Returns the precision level to use right now.
    fn dynamic_precision(&self) -> Result<PrecisionLevel, BoxError>;

    /// Snaps a coordinate to a grid cell at `precision`.
    fn to_grid(
        &self,
        latitude: f64,
        longitude: f64,
        precision: PrecisionLevel,
    ) -> Result<GridCell, BoxError>;
}

/// Configuration for [`PrecisionGrid`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Decimal digits kept for both axes.
    pub precision: u8,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
        }
    }
}

/// Locator that floors coordinates to a fixed number of decimal digits.
#[derive(Clone, Debug, Default)]
pub struct PrecisionGrid {
    config: GridConfig,
}

impl PrecisionGrid {
    /// Creates a locator from configuration.
    pub fn new(config: GridConfig) -> Self {
        Self { config }
    }
}

impl GridLocator for PrecisionGrid {
    fn dynamic_precision(&self) -> Result<PrecisionLevel, BoxError> {
        Ok(PrecisionLevel::new(self.config.precision)?)
    }

    fn to_grid(
        &self,
        latitude: f64,
        longitude: f64,
        precision: PrecisionLevel,
    ) -> Result<GridCell, BoxError> {
        check_axis("latitude", latitude, 90.0)?;
        check_axis("longitude", longitude, 180.0)?;

        let scale = 10f64.powi(i32::from(precision.digits()));
        Ok(GridCell::new(vec![
            (latitude * scale).floor() as i64,
            (longitude * scale).floor() as i64,
        ]))
    }
}

fn check_axis(axis: &'static str, value: f64, limit: f64) -> Result<(), GeoError> {
    if !value.is_finite() || value.abs() > limit {
        return Err(GeoError::InvalidCoordinate { axis, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn golden_gate_cell() {
        let grid = PrecisionGrid::default();
        let precision = grid.dynamic_precision().unwrap();
        let cell = grid.to_grid(37.8199, -122.4783, precision).unwrap();

        assert_eq!(cell.values(), &[3781, -12248]);
        assert_eq!(cell.to_string(), "[3781 -12248]");
    }

    #[test]
    fn precision_changes_cell_size() {
        let grid = PrecisionGrid::default();
        let coarse = grid
            .to_grid(51.5074, -0.1278, PrecisionLevel::new(0).unwrap())
            .unwrap();
        let fine = grid
            .to_grid(51.5074, -0.1278, PrecisionLevel::new(3).unwrap())
            .unwrap();

        assert_eq!(coarse.values(), &[51, -1]);
        assert_eq!(fine.values(), &[51507, -128]);
    }

    #[test]
    fn byte_encoding() {
        let cell = GridCell::new(vec![1, -1]);
        let bytes = cell.to_bytes();
        assert_eq!(bytes.len(), 16);
        assert_eq!(&bytes[..8], &[0, 0, 0, 0, 0, 0, 0, 1]);
        assert_eq!(&bytes[8..], &[0xFF; 8]);
    }

    #[test]
    fn empty_cell() {
        let cell = GridCell::default();
        assert!(cell.is_empty());
        assert!(cell.to_bytes().is_empty());
        assert_eq!(cell.to_string(), "[]");
    }

    #[test]
    fn invalid_coordinates() {
        let grid = PrecisionGrid::default();
        let precision = PrecisionLevel::default();
        for (lat, lon) in [(91.0, 0.0), (0.0, -180.5), (f64::NAN, 0.0), (0.0, f64::INFINITY)] {
            assert!(grid.to_grid(lat, lon, precision).is_err(), "({lat}, {lon})");
        }
    }

    #[test]
    fn configured_precision_is_validated() {
        let grid = PrecisionGrid::new(GridConfig { precision: 9 });
        let err = grid.dynamic_precision().unwrap_err();
        assert!(err.downcast_ref::<GeoError>().is_some());
    }

    #[test]
    fn precision_level_serde() {
        let level: PrecisionLevel = serde_json::from_str("4").unwrap();
        assert_eq!(level.digits(), 4);
        assert!(serde_json::from_str::<PrecisionLevel>("7").is_err());
    }
}
