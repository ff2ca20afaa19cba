//! Threshold-based terrain classification and rasterization.
//!
//! `N` ascending thresholds split the height range into `N + 1` bands.
//! A height equal to a threshold belongs to the band above it.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TerrainError};
use crate::tilemap::{Heightmap, PixelBuffer, Tilemap};

/// Cut points of the reference six-band palette.
pub const STANDARD_THRESHOLDS: [f32; 5] = [0.3, 0.45, 0.6, 0.8, 0.9];

/// A named height band and its display color.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerrainBand {
    pub name: String,
    pub color: [u8; 3],
}

impl TerrainBand {
    pub fn new(name: impl Into<String>, color: [u8; 3]) -> Self {
        Self { name: name.into(), color }
    }
}

/// Ordered band colors, lowest band first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    bands: Vec<TerrainBand>,
}

impl Palette {
    pub fn new(bands: Vec<TerrainBand>) -> Self {
        Self { bands }
    }

    /// Sea, beach, grass, forest, mountain, snow.
    pub fn standard() -> Self {
        Self::new(vec![
            TerrainBand::new("sea", [50, 120, 200]),
            TerrainBand::new("beach", [220, 220, 10]),
            TerrainBand::new("grass", [100, 200, 0]),
            TerrainBand::new("forest", [75, 150, 0]),
            TerrainBand::new("mountain", [200, 200, 200]),
            TerrainBand::new("snow", [255, 255, 255]),
        ])
    }

    pub fn bands(&self) -> &[TerrainBand] {
        &self.bands
    }

    pub fn len(&self) -> usize {
        self.bands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }
}

/// Strictly ascending cut points in [0, 1].
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainThresholds(Vec<f32>);

impl TerrainThresholds {
    pub fn new(values: Vec<f32>) -> Result<Self> {
        if let Some(&bad) = values.iter().find(|v| !(0.0..=1.0).contains(*v)) {
            return Err(TerrainError::ThresholdOutOfRange(bad));
        }
        if values.windows(2).any(|w| w[0] >= w[1]) {
            return Err(TerrainError::UnorderedThresholds(values));
        }
        Ok(Self(values))
    }

    pub fn standard() -> Self {
        Self(STANDARD_THRESHOLDS.to_vec())
    }

    /// Smallest `i` with `v < thresholds[i]`, or the last band if none.
    pub fn band_index(&self, v: f32) -> usize {
        self.0.partition_point(|&t| t <= v)
    }

    pub fn band_count(&self) -> usize {
        self.0.len() + 1
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }
}

/// Thresholds paired with a palette of exactly one more color.
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainClassifier {
    thresholds: TerrainThresholds,
    palette: Palette,
}

impl TerrainClassifier {
    pub fn new(thresholds: TerrainThresholds, palette: Palette) -> Result<Self> {
        if palette.len() != thresholds.band_count() {
            return Err(TerrainError::PaletteMismatch {
                thresholds: thresholds.as_slice().len(),
                bands: palette.len(),
            });
        }
        Ok(Self { thresholds, palette })
    }

    pub fn standard() -> Self {
        Self {
            thresholds: TerrainThresholds::standard(),
            palette: Palette::standard(),
        }
    }

    /// Custom cut points against the standard six-band palette.
    pub fn with_thresholds(values: Vec<f32>) -> Result<Self> {
        Self::new(TerrainThresholds::new(values)?, Palette::standard())
    }

    pub fn thresholds(&self) -> &TerrainThresholds {
        &self.thresholds
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn classify(&self, v: f32) -> &TerrainBand {
        &self.palette.bands[self.thresholds.band_index(v)]
    }

    pub fn color(&self, v: f32) -> [u8; 3] {
        self.classify(v).color
    }

    /// Number of cells falling into each band.
    pub fn histogram(&self, heightmap: &Heightmap) -> Vec<usize> {
        let mut counts = vec![0; self.palette.len()];
        for &h in heightmap.as_slice() {
            counts[self.thresholds.band_index(h)] += 1;
        }
        counts
    }
}

/// Grey level `floor(255 * v)`, clamped so 1.0 stays at 255.
pub fn grayscale(v: f32) -> [u8; 3] {
    let c = (255.0 * v).floor().clamp(0.0, 255.0) as u8;
    [c, c, c]
}

/// Color every cell, by band when a classifier is given, else as grey.
pub fn rasterize(heightmap: &Heightmap, classifier: Option<&TerrainClassifier>) -> Result<PixelBuffer> {
    if heightmap.is_empty() {
        return Err(TerrainError::EmptyHeightmap);
    }

    let pixels: Vec<[u8; 3]> = heightmap
        .as_slice()
        .par_iter()
        .map(|&h| match classifier {
            Some(classifier) => classifier.color(h),
            None => grayscale(h),
        })
        .collect();

    Ok(Tilemap::from_vec(heightmap.width, heightmap.height, pixels))
}
