use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info, Level};

use rgb_split::{config::Config, Content, RenderSession};

#[derive(Parser)]
#[command(
    name = "rgb-split",
    version,
    about = "Apply a chromatic-aberration RGB split to SVG graphics and text",
    long_about = "RGB-Split separates a graphic into red, green and blue layers, displaces each one with a deterministic algorithm and writes the result as a standalone SVG document."
)]
struct Cli {
    /// SVG file to split
    #[arg(short, long, conflicts_with = "text")]
    svg: Option<PathBuf>,

    /// Text to render and split instead of an SVG file
    #[arg(short, long)]
    text: Option<String>,

    /// Output SVG file path
    #[arg(short, long)]
    output: PathBuf,

    /// Configuration file (optional)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Preset to apply on top of the configuration (subtle, glitch, vhs, 3d, neon, retro)
    #[arg(short, long)]
    preset: Option<String>,

    /// Displacement algorithm (classic, radial, angular, wave, noise, barrel, pincushion)
    #[arg(short, long)]
    algorithm: Option<String>,

    /// Noise seed
    #[arg(long, allow_negative_numbers = true)]
    seed: Option<i64>,

    /// Render target width in px
    #[arg(long)]
    width: Option<f64>,

    /// Render target height in px
    #[arg(long)]
    height: Option<f64>,

    /// Channel paint order, e.g. "bgr"
    #[arg(long)]
    layer_order: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .init();

    info!("Starting RGB-Split v{}", env!("CARGO_PKG_VERSION"));

    let mut config = match cli.config {
        Some(ref config_path) => {
            info!("Loading configuration from {:?}", config_path);
            Config::from_file(config_path)?
        }
        None => {
            info!("Using default configuration");
            Config::default()
        }
    };

    if let Some(width) = cli.width {
        config.render.width = width;
    }
    if let Some(height) = cli.height {
        config.render.height = height;
    }
    config.validate()?;

    let mut session = RenderSession::new(config.settings.clone());
    if let Some(ref preset) = cli.preset {
        session.apply_preset(preset)?;
    }
    session.update(|settings| {
        if let Some(ref algorithm) = cli.algorithm {
            settings.algorithm = algorithm.clone();
        }
        if let Some(seed) = cli.seed {
            settings.noise_seed = seed;
        }
        if let Some(ref order) = cli.layer_order {
            settings.layer_order = order.clone();
        }
    });

    if !session.compositor().registry().has_algorithm(&session.settings().algorithm) {
        info!(
            "Unknown algorithm '{}', using classic offset",
            session.settings().algorithm
        );
    }

    let content = match (&cli.svg, &cli.text) {
        (Some(path), _) => {
            info!("Input: {:?}", path);
            let markup = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {:?}", path))?;
            Some(Content::require_svg(&markup)?)
        }
        (None, Some(text)) => {
            info!("Input text: {:?}", text);
            Content::from_text(text, &config.text)
        }
        (None, None) => None,
    };

    if content.is_none() {
        info!("No content given; the document will hold only the background");
    }

    let bounds = config.render.bounds();
    let ticket = session.begin_export();

    for layer in session.compose(content.as_ref(), bounds) {
        let offset = layer.translation();
        debug!(
            "{} layer: offset ({:.2}, {:.2}), opacity {:.2}, blend {}",
            layer.kind().name(),
            offset.x,
            offset.y,
            layer.opacity(),
            layer.blend()
        );
    }

    let document = session.export(content.as_ref(), bounds);
    let (raster_width, raster_height) = document.raster_size(config.render.supersample);
    info!(
        "Exported {} layers at {}x{} (raster {}x{})",
        document.groups.len(),
        document.width,
        document.height,
        raster_width,
        raster_height
    );

    let svg = ticket
        .deliver(document.to_svg())
        .context("Export was superseded")?;
    std::fs::write(&cli.output, svg)
        .with_context(|| format!("Failed to write {:?}", cli.output))?;

    info!("Output saved to: {:?}", cli.output);
    Ok(())
}
