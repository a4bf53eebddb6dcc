use serde::{Deserialize, Serialize};

use crate::error::{Result, StackupError};

/// Default manufacturing grid: 1nm when lengths are in microns.
pub const DEFAULT_GRID_UNIT: f64 = 0.001;

/// Relative tolerance (in grid units) used when deciding whether a real
/// length already sits on the grid.
const ALIGN_TOLERANCE: f64 = 1e-6;

/// The manufacturing grid quantum.
///
/// Every length handed back to callers is an exact multiple of this unit.
/// Internally lengths are carried as `i64` counts of grid units and only
/// converted to `f64` at the public boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct GridUnit {
    unit: f64,
}

impl GridUnit {
    pub fn new(unit: f64) -> Result<Self> {
        if !unit.is_finite() || unit <= 0.0 {
            return Err(StackupError::InvalidGrid(unit));
        }
        Ok(Self { unit })
    }

    pub fn unit(&self) -> f64 {
        self.unit
    }

    /// Grid units per unit length.
    fn scale(&self) -> f64 {
        1.0 / self.unit
    }

    /// Round `x` to the nearest multiple of the grid unit.
    pub fn snap(&self, x: f64) -> f64 {
        self.to_length(self.to_units(x))
    }

    /// Nearest number of grid units to `x`.
    pub fn to_units(&self, x: f64) -> i64 {
        (x * self.scale()).round() as i64
    }

    /// Largest number of grid units not exceeding `x`.
    ///
    /// Values within float noise of a grid point count as that grid point.
    pub fn floor_units(&self, x: f64) -> i64 {
        let scaled = x * self.scale();
        let nearest = scaled.round();
        if (scaled - nearest).abs() < ALIGN_TOLERANCE {
            nearest as i64
        } else {
            scaled.floor() as i64
        }
    }

    /// Number of grid units in `x`, or `None` if `x` is off-grid.
    pub fn aligned_units(&self, x: f64) -> Option<i64> {
        if !x.is_finite() {
            return None;
        }
        let scaled = x * self.scale();
        let nearest = scaled.round();
        ((scaled - nearest).abs() < ALIGN_TOLERANCE).then_some(nearest as i64)
    }

    /// Convert a count of grid units back to a length.
    pub fn to_length(&self, units: i64) -> f64 {
        units as f64 / self.scale()
    }
}

impl Default for GridUnit {
    fn default() -> Self {
        Self {
            unit: DEFAULT_GRID_UNIT,
        }
    }
}

impl TryFrom<f64> for GridUnit {
    type Error = StackupError;

    fn try_from(unit: f64) -> Result<Self> {
        Self::new(unit)
    }
}

impl From<GridUnit> for f64 {
    fn from(grid: GridUnit) -> f64 {
        grid.unit
    }
}
