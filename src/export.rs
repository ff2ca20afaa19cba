//! Image sink: turns pixel buffers into `image` buffers, zooms and saves them.

use std::path::Path;

use image::imageops::{self, FilterType};
use image::{ImageBuffer, Rgb, RgbImage};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Result, TerrainError};
use crate::tilemap::{Heightmap, PixelBuffer};

/// Resampling used when magnifying a rendered map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ZoomFilter {
    /// Hard pixel edges, band boundaries stay crisp.
    #[default]
    Nearest,
    Triangle,
    Lanczos3,
}

impl ZoomFilter {
    fn filter_type(self) -> FilterType {
        match self {
            ZoomFilter::Nearest => FilterType::Nearest,
            ZoomFilter::Triangle => FilterType::Triangle,
            ZoomFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Copy a pixel buffer into an RGB image of the same size.
pub fn to_rgb_image(pixels: &PixelBuffer) -> RgbImage {
    let mut img: RgbImage = ImageBuffer::new(pixels.width as u32, pixels.height as u32);
    for (x, y, &color) in pixels.iter() {
        img.put_pixel(x as u32, y as u32, Rgb(color));
    }
    img
}

/// Largest zoomed image, in pixels, the sink will allocate.
pub const MAX_ZOOM_PIXELS: u64 = 1 << 28;

/// Magnify an image by an integer factor. A factor of 1 is a copy.
pub fn zoom(img: &RgbImage, factor: u32, filter: ZoomFilter) -> Result<RgbImage> {
    if factor == 0 {
        return Err(TerrainError::InvalidZoom(factor));
    }
    if factor == 1 {
        return Ok(img.clone());
    }
    let (Some(width), Some(height)) = (img.width().checked_mul(factor), img.height().checked_mul(factor)) else {
        return Err(TerrainError::InvalidZoom(factor));
    };
    if width as u64 * height as u64 > MAX_ZOOM_PIXELS {
        return Err(TerrainError::InvalidZoom(factor));
    }
    Ok(imageops::resize(img, width, height, filter.filter_type()))
}

/// Save a pixel buffer, magnified by `factor`. Format follows the extension.
pub fn save_pixels(pixels: &PixelBuffer, path: impl AsRef<Path>, factor: u32, filter: ZoomFilter) -> Result<()> {
    let path = path.as_ref();
    let img = zoom(&to_rgb_image(pixels), factor, filter)?;
    img.save(path)?;
    info!(path = %path.display(), width = img.width(), height = img.height(), "saved terrain image");
    Ok(())
}

/// Export a heightmap using a spectral colormap, for inspecting raw values.
/// Values are expected to be normalized (0.0-1.0).
pub fn export_heightmap(heightmap: &Heightmap, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let mut img: RgbImage = ImageBuffer::new(heightmap.width as u32, heightmap.height as u32);

    for (x, y, &val) in heightmap.iter() {
        img.put_pixel(x as u32, y as u32, Rgb(spectral_colormap(val.clamp(0.0, 1.0))));
    }

    img.save(path)?;
    info!(path = %path.display(), "saved heightmap preview");
    Ok(())
}

/// Spectral colormap (matplotlib style): dark blue -> cyan -> green -> yellow -> orange -> red
fn spectral_colormap(t: f32) -> [u8; 3] {
    let colors: [[f32; 3]; 11] = [
        [0.37, 0.31, 0.64],
        [0.20, 0.53, 0.74],
        [0.40, 0.76, 0.65],
        [0.67, 0.87, 0.64],
        [0.90, 0.96, 0.60],
        [1.00, 1.00, 0.75],
        [1.00, 0.88, 0.55],
        [0.99, 0.68, 0.38],
        [0.96, 0.43, 0.26],
        [0.84, 0.24, 0.31],
        [0.62, 0.00, 0.26],
    ];

    let t_scaled = t * 10.0;
    let idx = (t_scaled as usize).min(9);
    let frac = t_scaled - idx as f32;

    let c1 = colors[idx];
    let c2 = colors[idx + 1];

    [
        ((c1[0] + (c2[0] - c1[0]) * frac) * 255.0) as u8,
        ((c1[1] + (c2[1] - c1[1]) * frac) * 255.0) as u8,
        ((c1[2] + (c2[2] - c1[2]) * frac) * 255.0) as u8,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tilemap::Tilemap;

    fn checker() -> PixelBuffer {
        Tilemap::from_vec(2, 2, vec![[255, 0, 0], [0, 255, 0], [0, 0, 255], [255, 255, 255]])
    }

    #[test]
    fn test_rgb_image_matches_buffer() {
        let img = to_rgb_image(&checker());
        assert_eq!(img.dimensions(), (2, 2));
        assert_eq!(img.get_pixel(1, 0), &Rgb([0, 255, 0]));
        assert_eq!(img.get_pixel(0, 1), &Rgb([0, 0, 255]));
    }

    #[test]
    fn test_nearest_zoom_replicates_pixels() {
        let img = zoom(&to_rgb_image(&checker()), 3, ZoomFilter::Nearest).unwrap();
        assert_eq!(img.dimensions(), (6, 6));
        assert_eq!(img.get_pixel(0, 0), &Rgb([255, 0, 0]));
        assert_eq!(img.get_pixel(5, 0), &Rgb([0, 255, 0]));
        assert_eq!(img.get_pixel(5, 5), &Rgb([255, 255, 255]));
    }

    #[test]
    fn test_zero_zoom_rejected() {
        let img = to_rgb_image(&checker());
        assert!(matches!(zoom(&img, 0, ZoomFilter::Nearest), Err(TerrainError::InvalidZoom(0))));
    }

    #[test]
    fn test_oversized_zoom_rejected() {
        let img: RgbImage = ImageBuffer::new(256, 256);
        assert!(matches!(
            zoom(&img, 20_000_000, ZoomFilter::Nearest),
            Err(TerrainError::InvalidZoom(20_000_000))
        ));
        // Fits in u32 but exceeds the pixel cap
        assert!(matches!(zoom(&img, 4096, ZoomFilter::Nearest), Err(TerrainError::InvalidZoom(4096))));
        assert!(zoom(&img, 4, ZoomFilter::Nearest).is_ok());
    }

    #[test]
    fn test_save_and_reload_png() {
        let path = std::env::temp_dir().join(format!("terrain_painter_sink_{}.png", std::process::id()));
        save_pixels(&checker(), &path, 2, ZoomFilter::Nearest).unwrap();
        let reloaded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(reloaded.dimensions(), (4, 4));
        assert_eq!(reloaded.get_pixel(3, 3), &Rgb([255, 255, 255]));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_spectral_endpoints() {
        assert_eq!(spectral_colormap(0.0), [94, 79, 163]);
        assert_eq!(spectral_colormap(1.0), [158, 0, 66]);
    }
}
