//! Terrain painting library
//!
//! Seeded coherent noise, octave blending and threshold classification
//! into an RGB buffer. Re-exports modules for use by the binary and tests.

pub mod compositor;
pub mod config;
pub mod error;
pub mod export;
pub mod field;
pub mod params;
pub mod pipeline;
pub mod terrain;
pub mod tilemap;
pub mod viewer;

pub use compositor::{composite, generate_octaves, Octave};
pub use error::{Result, TerrainError};
pub use field::{generate, KernelKind, NoiseKernel};
pub use params::{GridSize, Period};
pub use terrain::{rasterize, TerrainClassifier, TerrainThresholds};
pub use tilemap::{Heightmap, PixelBuffer, Tilemap};
