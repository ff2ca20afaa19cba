use terrain_painter::config::MapConfig;
use terrain_painter::pipeline;
use terrain_painter::terrain::{rasterize, TerrainClassifier};
use terrain_painter::{composite, generate, GridSize, Period};

const REFERENCE_COLORS: [[u8; 3]; 6] = [
    [50, 120, 200],
    [220, 220, 10],
    [100, 200, 0],
    [75, 150, 0],
    [200, 200, 200],
    [255, 255, 255],
];

fn reference_band(h: f32) -> usize {
    let thresholds = [0.3, 0.45, 0.6, 0.8, 0.9];
    thresholds.iter().position(|&t| h < t).unwrap_or(thresholds.len())
}

#[test]
fn two_by_two_map_uses_reference_colors() {
    let grid = GridSize::new(2, 2).unwrap();
    let period = Period::new(1.0, 1.0).unwrap();
    let heightmap = generate(grid, period, 1337).unwrap();

    let classifier = TerrainClassifier::with_thresholds(vec![0.3, 0.45, 0.6, 0.8, 0.9]).unwrap();
    let pixels = rasterize(&heightmap, Some(&classifier)).unwrap();

    assert_eq!(pixels.dimensions(), (2, 2));
    for (x, y, &px) in pixels.iter() {
        let h = *heightmap.get(x, y);
        assert_eq!(px, REFERENCE_COLORS[reference_band(h)], "cell ({}, {}) height {}", x, y, h);
    }

    // Same seed, same picture
    let again = rasterize(&generate(grid, period, 1337).unwrap(), Some(&classifier)).unwrap();
    assert_eq!(pixels, again);
}

#[test]
fn octave_blend_then_grayscale() {
    let grid = GridSize::new(32, 16).unwrap();
    let coarse = generate(grid, Period::uniform(3.0).unwrap(), 10).unwrap();
    let fine = generate(grid, Period::uniform(12.0).unwrap(), 11).unwrap();
    let blended = composite(&[(&coarse, 0.8), (&fine, 0.2)]).unwrap();

    let pixels = rasterize(&blended, None).unwrap();
    for (x, y, &[r, g, b]) in pixels.iter() {
        assert_eq!(r, g);
        assert_eq!(g, b);
        assert_eq!(r, (255.0 * *blended.get(x, y)).floor().clamp(0.0, 255.0) as u8);
    }
}

#[test]
fn configured_pipeline_is_reproducible() {
    let config = MapConfig {
        width: 40,
        height: 30,
        ..MapConfig::default()
    };
    let a = pipeline::render(&config, 99).unwrap();
    let b = pipeline::render(&config, 99).unwrap();
    assert_eq!(a.heightmap, b.heightmap);
    assert_eq!(a.pixels, b.pixels);
    assert_eq!(a.band_counts.iter().sum::<usize>(), 40 * 30);

    let c = pipeline::render(&config, 100).unwrap();
    assert_ne!(a.heightmap, c.heightmap);
}

#[test]
fn invalid_config_fails_before_sampling() {
    let config = MapConfig {
        width: 0,
        ..MapConfig::default()
    };
    assert!(pipeline::render(&config, 1).is_err());

    let config = MapConfig {
        thresholds: vec![0.9, 0.1, 0.2, 0.3, 0.4],
        ..MapConfig::default()
    };
    assert!(pipeline::render(&config, 1).is_err());
}
