use std::error::Error;

use minifb::{Key, KeyRepeat, Window, WindowOptions};
use tracing::info;

use crate::config::MapConfig;
use crate::pipeline::{self, RenderedMap};
use crate::tilemap::PixelBuffer;

/// Show the rendered map in a window.
/// Press R to regenerate with a fresh seed, G to toggle grayscale, Escape to exit.
pub fn run_viewer(config: &MapConfig, initial_seed: u64) -> Result<(), Box<dyn Error>> {
    let grid = config.grid()?;
    let mut config = config.clone();
    let (width, height) = (grid.width, grid.height);

    // Target ~900 pixels on the larger dimension
    let target_size = 900;
    let scale = if width.max(height) > target_size {
        1
    } else {
        (target_size / width.max(height)).max(1)
    };

    let window_width = width * scale;
    let window_height = height * scale;

    let mut window = Window::new(
        "Terrain Painter - R: Regenerate, G: Grayscale, Esc: Exit",
        window_width,
        window_height,
        WindowOptions {
            resize: false,
            scale: minifb::Scale::X1,
            ..WindowOptions::default()
        },
    )?;

    // Limit to ~60fps
    window.set_target_fps(60);

    let mut map = regenerate(&config, initial_seed)?;
    let mut buffer = scale_buffer(&map.pixels, scale);

    while window.is_open() && !window.is_key_down(Key::Escape) {
        let mut needs_redraw = false;

        if window.is_key_pressed(Key::R, KeyRepeat::No) {
            map = regenerate(&config, rand::random())?;
            needs_redraw = true;
        }

        if window.is_key_pressed(Key::G, KeyRepeat::No) {
            config.grayscale = !config.grayscale;
            map = regenerate(&config, map.seed)?;
            needs_redraw = true;
        }

        if needs_redraw {
            buffer = scale_buffer(&map.pixels, scale);
        }

        window.update_with_buffer(&buffer, window_width, window_height)?;
    }

    Ok(())
}

fn regenerate(config: &MapConfig, seed: u64) -> Result<RenderedMap, Box<dyn Error>> {
    info!(seed, grayscale = config.grayscale, "rendering map");
    Ok(pipeline::render(config, seed)?)
}

/// Expand each cell to a `scale`×`scale` block of packed 0RGB words.
fn scale_buffer(pixels: &PixelBuffer, scale: usize) -> Vec<u32> {
    let out_width = pixels.width * scale;
    let mut buffer = vec![0u32; out_width * pixels.height * scale];

    for (x, y, &[r, g, b]) in pixels.iter() {
        let packed = ((r as u32) << 16) | ((g as u32) << 8) | b as u32;
        for dy in 0..scale {
            let row = (y * scale + dy) * out_width;
            for dx in 0..scale {
                buffer[row + x * scale + dx] = packed;
            }
        }
    }

    buffer
}
