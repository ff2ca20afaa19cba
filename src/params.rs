//! Grid and frequency parameters shared by every stage of the pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TerrainError};

/// Dimensions of the sampled grid, in cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSize {
    pub width: usize,
    pub height: usize,
}

impl GridSize {
    /// Create a grid size, rejecting zero-sized axes and unaddressable cell counts.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let size = Self { width, height };
        size.validate()?;
        Ok(size)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 || self.width.checked_mul(self.height).is_none() {
            return Err(TerrainError::InvalidGridSize {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }
}

/// Noise-space extent per axis.
///
/// A cell at `x` samples noise at `period.x * (x / width - 0.5)`, so the
/// grid spans `period.x` noise units horizontally, centred on the origin.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Period {
    pub x: f64,
    pub y: f64,
}

impl Period {
    pub fn new(x: f64, y: f64) -> Result<Self> {
        let period = Self { x, y };
        period.validate()?;
        Ok(period)
    }

    /// Same period on both axes.
    pub fn uniform(p: f64) -> Result<Self> {
        Self::new(p, p)
    }

    pub fn validate(&self) -> Result<()> {
        // NaN fails both comparisons, so it is rejected too
        if !(self.x > 0.0 && self.x.is_finite() && self.y > 0.0 && self.y.is_finite()) {
            return Err(TerrainError::InvalidPeriod { x: self.x, y: self.y });
        }
        Ok(())
    }

    /// Map a grid cell to its centred noise-space coordinate.
    pub fn project(&self, grid: GridSize, x: usize, y: usize) -> (f64, f64) {
        let xx = self.x * (x as f64 / grid.width as f64 - 0.5);
        let yy = self.y * (y as f64 / grid.height as f64 - 0.5);
        (xx, yy)
    }
}
