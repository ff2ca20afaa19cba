use thiserror::Error;

/// Errors raised by the terrain pipeline.
///
/// Argument errors are raised before any cell is computed.
#[derive(Debug, Error)]
pub enum TerrainError {
    #[error("grid size must be positive, got {width}x{height}")]
    InvalidGridSize { width: usize, height: usize },

    #[error("period must be positive and finite, got ({x}, {y})")]
    InvalidPeriod { x: f64, y: f64 },

    #[error("thresholds must be strictly ascending: {0:?}")]
    UnorderedThresholds(Vec<f32>),

    #[error("threshold {0} lies outside [0, 1]")]
    ThresholdOutOfRange(f32),

    #[error("palette has {bands} bands but {thresholds} thresholds were given (need one band more than thresholds)")]
    PaletteMismatch { thresholds: usize, bands: usize },

    #[error("octave weight must be finite, got {0}")]
    InvalidWeight(f32),

    #[error("composite needs at least one heightmap")]
    NoLayers,

    #[error("cannot rasterize an empty heightmap")]
    EmptyHeightmap,

    #[error("zoom factor {0} is out of range (must be at least 1 and keep the image within the pixel cap)")]
    InvalidZoom(u32),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TerrainError>;
