//! The full map pipeline: octaves, blend, classify.

use tracing::debug;

use crate::compositor::{generate_octaves, normalize};
use crate::config::MapConfig;
use crate::error::Result;
use crate::terrain::rasterize;
use crate::tilemap::{Heightmap, PixelBuffer};

/// A heightmap and its rendering, with the seed that produced them.
#[derive(Clone, Debug)]
pub struct RenderedMap {
    pub seed: u64,
    pub heightmap: Heightmap,
    pub pixels: PixelBuffer,
    /// Cells per band; empty in grayscale mode.
    pub band_counts: Vec<usize>,
}

/// Run every stage for one seed. Grid, thresholds, palette and octaves are validated before sampling.
pub fn render(config: &MapConfig, seed: u64) -> Result<RenderedMap> {
    let grid = config.grid()?;
    let classifier = config.classifier()?;

    let mut heightmap = generate_octaves(config.kernel, grid, &config.octaves, seed)?;
    if config.normalize {
        heightmap = normalize(&heightmap);
    }

    let pixels = rasterize(&heightmap, classifier.as_ref())?;
    let band_counts = classifier
        .as_ref()
        .map(|c| c.histogram(&heightmap))
        .unwrap_or_default();
    debug!(seed, ?band_counts, "rendered map");

    Ok(RenderedMap {
        seed,
        heightmap,
        pixels,
        band_counts,
    })
}
