use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use terrain_painter::config::MapConfig;
use terrain_painter::export::{self, ZoomFilter};
use terrain_painter::field::KernelKind;
use terrain_painter::{pipeline, viewer};

#[derive(Parser, Debug)]
#[command(name = "terrain_painter")]
#[command(about = "Paint terrain maps from seeded multi-octave noise")]
struct Args {
    /// Width of the map in cells
    #[arg(short = 'W', long)]
    width: Option<usize>,

    /// Height of the map in cells
    #[arg(short = 'H', long)]
    height: Option<usize>,

    /// Random seed (uses random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON map config; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Noise kernel
    #[arg(long, value_enum)]
    kernel: Option<KernelKind>,

    /// Render a grey ramp instead of terrain bands
    #[arg(long)]
    grayscale: bool,

    /// Stretch heights to the full [0, 1] range before classifying
    #[arg(long)]
    normalize: bool,

    /// Integer magnification of the saved image
    #[arg(short, long)]
    zoom: Option<u32>,

    /// Resampling filter used by --zoom
    #[arg(long, value_enum)]
    filter: Option<ZoomFilter>,

    /// Output image path
    #[arg(short, long, default_value = "terrain.png")]
    output: PathBuf,

    /// Also save the raw heightmap with a spectral colormap
    #[arg(long)]
    heightmap_output: Option<PathBuf>,

    /// Open an interactive window instead of only saving
    #[arg(long)]
    view: bool,

    /// Log per-stage statistics
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    let mut config = match &args.config {
        Some(path) => MapConfig::load(path)?,
        None => MapConfig::default(),
    };
    apply_overrides(&mut config, &args);

    // The library never picks its own seed
    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::info!("Generating terrain with seed: {}", seed);
    tracing::info!("Map size: {}x{}, {} octaves, {:?} kernel", config.width, config.height, config.octaves.len(), config.kernel);

    let map = pipeline::render(&config, seed)?;

    if let Some((min_h, max_h)) = map.heightmap.min_max() {
        tracing::info!("Height range: {:.3} to {:.3} (mean {:.3})", min_h, max_h, map.heightmap.mean());
    }
    if let Some(classifier) = config.classifier()? {
        let total = map.heightmap.len() as f64;
        for (band, count) in classifier.palette().bands().iter().zip(&map.band_counts) {
            tracing::info!("  {:<10} {:>5.1}%", band.name, 100.0 * *count as f64 / total);
        }
    }

    export::save_pixels(&map.pixels, &args.output, config.zoom, config.filter)?;
    if let Some(path) = &args.heightmap_output {
        export::export_heightmap(&map.heightmap, path)?;
    }

    if args.view {
        viewer::run_viewer(&config, seed)?;
    }

    Ok(())
}

fn apply_overrides(config: &mut MapConfig, args: &Args) {
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(kernel) = args.kernel {
        config.kernel = kernel;
    }
    if let Some(zoom) = args.zoom {
        config.zoom = zoom;
    }
    if let Some(filter) = args.filter {
        config.filter = filter;
    }
    config.grayscale |= args.grayscale;
    config.normalize |= args.normalize;
}
