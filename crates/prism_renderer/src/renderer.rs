//! Image rendering.
//!
//! Implements the outer sampling loop:
//! - Per-pixel jittered supersampling averaged into one color
//! - Bucketed parallel rendering on the rayon pool
//! - Clamped 8-bit conversion and PNG output

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use thiserror::Error;

use crate::bucket::{generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::{gen_signed, pixel_rng, radiance, Color, Interval, Scene};

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Base seed mixed into every pixel's generator
    pub seed: u64,
    /// Edge length of the square render buckets
    pub bucket_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: 1,
            seed: 0,
            bucket_size: DEFAULT_BUCKET_SIZE,
        }
    }
}

impl RenderConfig {
    pub fn with_samples(mut self, samples_per_pixel: u32) -> Self {
        self.samples_per_pixel = samples_per_pixel;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_bucket_size(mut self, bucket_size: u32) -> Self {
        self.bucket_size = bucket_size;
        self
    }
}

/// Errors from writing a rendered image.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to encode image: {0}")]
    Image(#[from] image::ImageError),

    #[error("pixel buffer of {len} bytes does not fit a {width}x{height} RGB image")]
    BufferSize { width: u32, height: u32, len: usize },
}

pub type OutputResult<T> = Result<T, OutputError>;

/// Convert a color to 8-bit RGB.
///
/// Channels are clamped to `[0, 1]` and scaled by 255, no gamma applied.
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    let channel = |v: f32| (255.0 * Interval::UNIT.clamp(v)) as u8;
    [channel(color.x), channel(color.y), channel(color.z)]
}

/// Render a single pixel with multi-sampling.
///
/// Each sample jitters the pixel position by up to one pixel in either
/// direction. Row 0 is the top of the image. The pixel's random stream is
/// derived from `config.seed` and its row-major index.
pub fn render_pixel(scene: &Scene, x: u32, y: u32, config: &RenderConfig) -> Color {
    let index = u64::from(y) * u64::from(scene.width) + u64::from(x);
    let mut rng = pixel_rng(config.seed, index);

    let (width, height) = (scene.width.max(1) as f32, scene.height.max(1) as f32);
    let samples = config.samples_per_pixel.max(1);
    let mut pixel_color = Color::ZERO;

    for _ in 0..samples {
        let sy = 1.0 - (y as f32 + gen_signed(&mut rng)) / height;
        let sx = (x as f32 + gen_signed(&mut rng)) / width;
        let ray = scene.camera.get_ray(sx, sy);
        pixel_color += radiance(scene, &ray, 0, &mut rng);
    }

    // Average the samples
    pixel_color / samples as f32
}

/// Linear color image, row-major with row 0 at the top.
#[derive(Debug, Clone)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.offset(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let offset = self.offset(x, y);
        self.pixels[offset] = color;
    }

    /// Copy a rendered bucket into place.
    pub fn write_bucket(&mut self, result: &BucketResult) {
        let bucket = &result.bucket;
        for (row, line) in result.pixels.chunks(bucket.width.max(1) as usize).enumerate() {
            let start = self.offset(bucket.x, bucket.y + row as u32);
            self.pixels[start..start + line.len()].copy_from_slice(line);
        }
    }

    /// Convert to packed RGB bytes.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| color_to_rgb8(*c)).collect()
    }

    /// Write the image as a PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> OutputResult<()> {
        let bytes = self.to_rgb8();
        let len = bytes.len();
        let rgb = image::RgbImage::from_raw(self.width, self.height, bytes).ok_or(
            OutputError::BufferSize {
                width: self.width,
                height: self.height,
                len,
            },
        )?;

        rgb.save_with_format(path.as_ref(), image::ImageFormat::Png)?;
        log::info!("Saved {}x{} image to {}", self.width, self.height, path.as_ref().display());
        Ok(())
    }
}

/// Render the entire scene to an image buffer.
///
/// Buckets are rendered in parallel; the result does not depend on the
/// number of threads or on `config.bucket_size`.
pub fn render(scene: &Scene, config: &RenderConfig) -> ImageBuffer {
    let buckets = generate_buckets(scene.width, scene.height, config.bucket_size);
    let total = buckets.len();

    log::info!(
        "Rendering {}x{}, {} spp, {} buckets on {} threads",
        scene.width,
        scene.height,
        config.samples_per_pixel.max(1),
        total,
        rayon::current_num_threads()
    );

    let finished = AtomicUsize::new(0);
    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| {
            let result = render_bucket(bucket, scene, config);

            let done = finished.fetch_add(1, Ordering::Relaxed) + 1;
            if done * 10 / total != (done - 1) * 10 / total {
                log::info!("Progress: {}%", done * 100 / total);
            }
            result
        })
        .collect();

    let mut image = ImageBuffer::new(scene.width, scene.height);
    for result in &results {
        image.write_bucket(result);
    }
    image
}
