//! Prism command-line renderer.
//!
//! Usage: `prism [bvh] [scene] [samples] [output]`
//!
//! - `bvh`: `0` disables the BVH, anything else enables it (default on)
//! - `scene`: preset index, see [`scenes::build`] (default 0)
//! - `samples`: samples per pixel (default 1)
//! - `output`: PNG path (default `output.png`)
//!
//! Mesh files are read from the directory in `PRISM_MODELS`
//! (default `models`).

mod scenes;

use std::path::PathBuf;
use std::str::FromStr;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use prism_renderer::{render, RenderConfig};

#[derive(Debug, Clone, PartialEq)]
struct Options {
    use_bvh: bool,
    scene: usize,
    samples: u32,
    output: PathBuf,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            use_bvh: true,
            scene: 0,
            samples: 1,
            output: PathBuf::from("output.png"),
        }
    }
}

impl Options {
    /// Parse positional arguments (program name already stripped).
    fn parse(args: impl IntoIterator<Item = String>) -> Self {
        let mut options = Self::default();
        let mut args = args.into_iter();

        if let Some(arg) = args.next() {
            options.use_bvh = parse_or(&arg, "bvh", 1i64) != 0;
        }
        if let Some(arg) = args.next() {
            options.scene = parse_or(&arg, "scene", options.scene);
        }
        if let Some(arg) = args.next() {
            options.samples = parse_or(&arg, "samples", options.samples);
        }
        if let Some(arg) = args.next() {
            options.output = PathBuf::from(arg);
        }
        for extra in args {
            log::warn!("Ignoring extra argument {extra:?}");
        }

        options
    }
}

fn parse_or<T: FromStr + std::fmt::Display>(arg: &str, name: &str, default: T) -> T {
    arg.trim().parse().unwrap_or_else(|_| {
        log::warn!("Invalid {name} {arg:?}, using {default}");
        default
    })
}

/// Format a duration as `mm:ss`.
fn format_elapsed(elapsed: Duration) -> String {
    let seconds = elapsed.as_secs();
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let options = Options::parse(std::env::args().skip(1));
    let models = std::env::var_os("PRISM_MODELS")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("models"));

    log::info!(
        "Starting Prism: scene {}, {} spp, BVH {}",
        options.scene,
        options.samples,
        if options.use_bvh { "on" } else { "off" }
    );

    let mut scene = scenes::build(options.scene, &models, options.use_bvh)
        .with_context(|| format!("failed to build scene {}", options.scene))?;
    if options.use_bvh {
        scene.build_bvh();
    }

    let config = RenderConfig::default().with_samples(options.samples);
    let start = Instant::now();
    let image = render(&scene, &config);
    let elapsed = start.elapsed();

    image
        .save_png(&options.output)
        .with_context(|| format!("failed to write {}", options.output.display()))?;

    log::info!(
        "Complete {} BVH! Time taken: {}",
        if options.use_bvh { "with" } else { "without" },
        format_elapsed(elapsed)
    );

    Ok(())
}
