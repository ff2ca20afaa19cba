//! Weighted blending of noise octaves into a single heightmap.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Result, TerrainError};
use crate::field::{self, KernelKind};
use crate::params::{GridSize, Period};
use crate::tilemap::{Heightmap, Tilemap};

/// Per-octave seed spacing, so octaves of one map are independent fields.
pub const OCTAVE_SEED_STRIDE: u64 = 1111;

/// One noise layer of a composite heightmap.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Octave {
    pub period: Period,
    pub weight: f32,
    /// Added (wrapping) to the map seed for this layer.
    #[serde(default)]
    pub seed_offset: u64,
}

impl Octave {
    pub fn new(period: Period, weight: f32, seed_offset: u64) -> Self {
        Self { period, weight, seed_offset }
    }
}

/// Broad landmasses with a lighter layer of fine detail on top.
pub fn default_octaves() -> Vec<Octave> {
    vec![
        Octave::new(Period { x: 4.0, y: 4.0 }, 0.8, 0),
        Octave::new(Period { x: 16.0, y: 16.0 }, 0.2, OCTAVE_SEED_STRIDE),
    ]
}

/// Sum `weight * value` per cell over all layers.
///
/// The result covers the union of the input domains. A layer that does not
/// reach a cell contributes 0 there; the mismatch is logged, not rejected.
pub fn composite(layers: &[(&Heightmap, f32)]) -> Result<Heightmap> {
    let Some((first, _)) = layers.first() else {
        return Err(TerrainError::NoLayers);
    };

    let width = layers.iter().map(|(map, _)| map.width).max().unwrap_or(0);
    let height = layers.iter().map(|(map, _)| map.height).max().unwrap_or(0);

    if layers.iter().any(|(map, _)| map.dimensions() != first.dimensions()) {
        let dims: Vec<_> = layers.iter().map(|(map, _)| map.dimensions()).collect();
        warn!(?dims, width, height, "compositing heightmaps of different sizes; missing cells count as 0");
    }

    let data: Vec<f32> = (0..width * height)
        .into_par_iter()
        .map(|idx| {
            let (x, y) = (idx % width, idx / width);
            let mut acc = 0.0f32;
            for (map, weight) in layers {
                if let Some(&v) = map.try_get(x, y) {
                    acc += weight * v;
                }
            }
            acc
        })
        .collect();

    Ok(Tilemap::from_vec(width, height, data))
}

/// Generate each octave's field and blend them.
pub fn generate_octaves(kind: KernelKind, grid: GridSize, octaves: &[Octave], seed: u64) -> Result<Heightmap> {
    if octaves.is_empty() {
        return Err(TerrainError::NoLayers);
    }
    grid.validate()?;
    // Every layer is checked before the first one is sampled
    for octave in octaves {
        octave.period.validate()?;
        if !octave.weight.is_finite() {
            return Err(TerrainError::InvalidWeight(octave.weight));
        }
    }

    let fields = octaves
        .iter()
        .map(|octave| field::generate_kind(kind, grid, octave.period, seed.wrapping_add(octave.seed_offset)))
        .collect::<Result<Vec<_>>>()?;

    let layers: Vec<(&Heightmap, f32)> = fields
        .iter()
        .zip(octaves)
        .map(|(map, octave)| (map, octave.weight))
        .collect();

    let blended = composite(&layers)?;
    if let Some((min_h, max_h)) = blended.min_max() {
        debug!(octaves = octaves.len(), min_h, max_h, mean = blended.mean(), "composited heightmap");
    }
    Ok(blended)
}

/// Stretch values to span [0, 1]. A flat map becomes uniformly 0.5.
pub fn normalize(heightmap: &Heightmap) -> Heightmap {
    let Some((min_h, max_h)) = heightmap.min_max() else {
        return heightmap.clone();
    };
    let range = max_h - min_h;
    let data = heightmap
        .as_slice()
        .iter()
        .map(|&h| {
            if range > f32::EPSILON {
                ((h - min_h) / range).clamp(0.0, 1.0)
            } else {
                0.5
            }
        })
        .collect();
    Tilemap::from_vec(heightmap.width, heightmap.height, data)
}
