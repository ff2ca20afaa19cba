//! Coherent noise fields sampled over a grid.
//!
//! A field is a pure function of `(grid, period, seed)`: each cell is
//! projected into noise space with [`Period::project`], sampled by a
//! [`NoiseKernel`] and rescaled from [-1, 1] to [0, 1].
//!
//! Cells are independent, so sampling is spread over the rayon pool.

mod perlin;
mod simplex;

pub use perlin::PerlinKernel;
pub use simplex::SimplexKernel;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::params::{GridSize, Period};
use crate::tilemap::{Heightmap, Tilemap};

/// A deterministic 2D gradient-noise function.
pub trait NoiseKernel: Send + Sync {
    /// Raw value at a noise-space point, in [-1, 1].
    fn sample(&self, x: f64, y: f64) -> f64;
}

/// Which kernel backs a field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum KernelKind {
    #[default]
    Simplex,
    Perlin,
}

impl KernelKind {
    pub fn build(self, seed: u64) -> Box<dyn NoiseKernel> {
        match self {
            KernelKind::Simplex => Box::new(SimplexKernel::new(seed)),
            KernelKind::Perlin => Box::new(PerlinKernel::new(seed)),
        }
    }
}

/// Generate a simplex field in [0, 1] for every cell of `grid`.
pub fn generate(grid: GridSize, period: Period, seed: u64) -> Result<Heightmap> {
    generate_kind(KernelKind::Simplex, grid, period, seed)
}

/// Generate a field with an explicitly chosen kernel.
pub fn generate_kind(kind: KernelKind, grid: GridSize, period: Period, seed: u64) -> Result<Heightmap> {
    grid.validate()?;
    period.validate()?;
    let kernel = kind.build(seed);
    debug!(?kind, seed, width = grid.width, height = grid.height, px = period.x, py = period.y, "sampling noise field");
    generate_with(kernel.as_ref(), grid, period)
}

/// Sample an existing kernel over the grid.
pub fn generate_with<K: NoiseKernel + ?Sized>(kernel: &K, grid: GridSize, period: Period) -> Result<Heightmap> {
    grid.validate()?;
    period.validate()?;

    let width = grid.width;
    let data: Vec<f32> = (0..grid.cell_count())
        .into_par_iter()
        .map(|idx| {
            let (xx, yy) = period.project(grid, idx % width, idx / width);
            to_unit(kernel.sample(xx, yy))
        })
        .collect();

    Ok(Tilemap::from_vec(grid.width, grid.height, data))
}

/// Rescale raw kernel output from [-1, 1] to [0, 1].
fn to_unit(raw: f64) -> f32 {
    (raw.clamp(-1.0, 1.0) / 2.0 + 0.5) as f32
}
