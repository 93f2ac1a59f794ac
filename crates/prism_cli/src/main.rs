use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::LevelFilter;
use prism_renderer::{
    render, render_buckets, save_image, Camera, ImageFormat, RenderConfig, Scene, Sphere, Vec3,
    DEFAULT_BUCKET_SIZE, DEFAULT_OUTPUT_FILE,
};

/// Log levels selectable from the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Parser)]
#[command(name = "prism")]
#[command(about = "Casts rays through a two-sphere scene and writes the image")]
struct Args {
    /// Image width in pixels
    #[arg(long, default_value_t = 400)]
    width: u32,

    /// Width / height ratio; the height is derived from it
    #[arg(long, default_value_t = 16.0 / 9.0)]
    aspect: f32,

    /// Samples per pixel (1 disables jitter)
    #[arg(long, short = 's', default_value_t = 50)]
    samples: u32,

    /// Output path (.ppm or .png)
    #[arg(long, short = 'o', default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// Render buckets on all cores instead of the single-threaded loop
    #[arg(long)]
    parallel: bool,

    /// Seed for the bucket renderer's jitter
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Logging level (overridden by RUST_LOG)
    #[arg(long, value_enum, default_value = "info")]
    log_level: LogLevel,
}

fn build_scene() -> Result<Scene> {
    let mut scene = Scene::new();
    scene.add(Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5))?;
    scene.add(Sphere::new(Vec3::new(0.0, -100.5, -1.0), 100.0))?;
    Ok(scene)
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level.into())
        .parse_default_env()
        .init();

    anyhow::ensure!(args.samples >= 1, "--samples must be at least 1");
    anyhow::ensure!(
        args.width >= 1 && args.aspect > 0.0,
        "--width must be positive and --aspect greater than zero"
    );

    let format = ImageFormat::from_width(args.width, args.aspect);
    let camera = Camera::new(format);
    let scene = build_scene()?;
    let config = RenderConfig {
        samples_per_pixel: args.samples,
        bucket_size: DEFAULT_BUCKET_SIZE,
    };

    log::info!("Computing render, starting timer");
    let start = Instant::now();

    let image = if args.parallel {
        render_buckets(&camera, &scene, &config, args.seed)
    } else {
        render(&camera, &scene, &config, &mut rand::thread_rng())
    };

    log::info!(
        "Finished render: resulting time {} microseconds",
        start.elapsed().as_micros()
    );
    log::info!("Saving image");

    save_image(&image, &args.output)
        .with_context(|| format!("Failed to save image to {}", args.output.display()))?;

    Ok(())
}
