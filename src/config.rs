//! Map configuration, loadable from JSON.
//!
//! Every field has a default, so a config file only needs the keys it
//! changes. Command-line flags are applied on top by the binary.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::compositor::{default_octaves, Octave};
use crate::error::Result;
use crate::export::ZoomFilter;
use crate::field::KernelKind;
use crate::params::GridSize;
use crate::terrain::{Palette, TerrainBand, TerrainClassifier, TerrainThresholds, STANDARD_THRESHOLDS};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub width: usize,
    pub height: usize,
    pub kernel: KernelKind,
    pub octaves: Vec<Octave>,
    /// Stretch the composite to the full [0, 1] range before classifying.
    pub normalize: bool,
    /// Render a grey ramp instead of terrain bands.
    pub grayscale: bool,
    pub thresholds: Vec<f32>,
    /// Band colors, lowest first; the six-band table when absent.
    pub palette: Option<Vec<TerrainBand>>,
    pub zoom: u32,
    pub filter: ZoomFilter,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
            kernel: KernelKind::default(),
            octaves: default_octaves(),
            normalize: false,
            grayscale: false,
            thresholds: STANDARD_THRESHOLDS.to_vec(),
            palette: None,
            zoom: 1,
            filter: ZoomFilter::default(),
        }
    }
}

impl MapConfig {
    /// Read a JSON config; missing keys fall back to defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn grid(&self) -> Result<GridSize> {
        GridSize::new(self.width, self.height)
    }

    /// `None` in grayscale mode, else the validated band classifier.
    pub fn classifier(&self) -> Result<Option<TerrainClassifier>> {
        if self.grayscale {
            return Ok(None);
        }
        let thresholds = TerrainThresholds::new(self.thresholds.clone())?;
        let palette = match &self.palette {
            Some(bands) => Palette::new(bands.clone()),
            None => Palette::standard(),
        };
        Ok(Some(TerrainClassifier::new(thresholds, palette)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TerrainError;

    #[test]
    fn test_empty_json_is_default() {
        assert_eq!(MapConfig::from_json("{}").unwrap(), MapConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = MapConfig::from_json(
            r#"{
                "width": 64,
                "kernel": "perlin",
                "octaves": [{ "period": { "x": 2.0, "y": 3.0 }, "weight": 1.0 }],
                "filter": "lanczos3"
            }"#,
        )
        .unwrap();
        assert_eq!(config.width, 64);
        assert_eq!(config.height, 256);
        assert_eq!(config.kernel, KernelKind::Perlin);
        assert_eq!(config.octaves.len(), 1);
        assert_eq!(config.octaves[0].seed_offset, 0);
        assert_eq!(config.filter, ZoomFilter::Lanczos3);
    }

    #[test]
    fn test_custom_palette_classifier() {
        let config = MapConfig::from_json(
            r#"{
                "thresholds": [0.5],
                "palette": [
                    { "name": "water", "color": [0, 0, 255] },
                    { "name": "land", "color": [0, 200, 0] }
                ]
            }"#,
        )
        .unwrap();
        let classifier = config.classifier().unwrap().unwrap();
        assert_eq!(classifier.color(0.7), [0, 200, 0]);
    }

    #[test]
    fn test_threshold_count_checked_against_palette() {
        let config = MapConfig {
            thresholds: vec![0.2, 0.4],
            ..MapConfig::default()
        };
        assert!(matches!(config.classifier(), Err(TerrainError::PaletteMismatch { .. })));
    }

    #[test]
    fn test_grayscale_has_no_classifier() {
        let config = MapConfig { grayscale: true, ..MapConfig::default() };
        assert!(config.classifier().unwrap().is_none());
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        assert!(matches!(MapConfig::from_json("{ width: }"), Err(TerrainError::Config(_))));
    }
}
