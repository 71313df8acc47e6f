//! Resize and color normalization for classifier input

use frogcheck_core::{Error, ProcessingConfig, Result};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, Rgb, RgbImage};
use std::sync::Arc;
use tracing::debug;

/// Scale `(width, height)` down so the longer side is at most `max_side`.
/// Dimensions already within bounds are returned unchanged.
pub fn cap_dimensions(width: u32, height: u32, max_side: u32) -> (u32, u32) {
    let longest = width.max(height);
    if longest <= max_side || longest == 0 {
        return (width, height);
    }

    let scale = max_side as f64 / longest as f64;
    let new_w = ((width as f64 * scale).round() as u32).clamp(1, max_side);
    let new_h = ((height as f64 * scale).round() as u32).clamp(1, max_side);
    (new_w, new_h)
}

/// Largest size with the same aspect ratio that fits inside the canvas.
///
/// Smaller images scale up; neither side ever exceeds the canvas.
pub fn contain_dimensions(width: u32, height: u32, canvas_w: u32, canvas_h: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (1, 1);
    }

    let scale = (canvas_w as f64 / width as f64).min(canvas_h as f64 / height as f64);
    let new_w = ((width as f64 * scale).round() as u32).clamp(1, canvas_w);
    let new_h = ((height as f64 * scale).round() as u32).clamp(1, canvas_h);
    (new_w, new_h)
}

/// Encode an RGB image as JPEG at the given quality
pub fn encode_jpeg(image: &RgbImage, quality: u8) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, quality)
        .encode_image(image)
        .map_err(|e| Error::internal(format!("JPEG encoding failed: {}", e)))?;
    Ok(buf)
}

/// Produces the canonical RGB image handed to the classifier
#[derive(Debug, Clone)]
pub struct ImageNormalizer {
    config: Arc<ProcessingConfig>,
}

impl ImageNormalizer {
    pub fn new(config: Arc<ProcessingConfig>) -> Self {
        Self { config }
    }

    /// Cap oversized input, contain-resize into the canvas, convert to RGB
    pub fn normalize(&self, image: DynamicImage) -> RgbImage {
        let (orig_w, orig_h) = (image.width(), image.height());

        // Bound the working size before the main resize
        let (cap_w, cap_h) = cap_dimensions(orig_w, orig_h, self.config.max_dimension);
        let image = if (cap_w, cap_h) != (orig_w, orig_h) {
            debug!(
                from = format!("{}x{}", orig_w, orig_h),
                to = format!("{}x{}", cap_w, cap_h),
                "Capping oversized image"
            );
            image.resize_exact(cap_w, cap_h, FilterType::Triangle)
        } else {
            image
        };

        let (fit_w, fit_h) = contain_dimensions(
            cap_w,
            cap_h,
            self.config.target_width,
            self.config.target_height,
        );
        let image = if (fit_w, fit_h) != (cap_w, cap_h) {
            image.resize_exact(fit_w, fit_h, FilterType::CatmullRom)
        } else {
            image
        };

        let rgb = flatten_to_rgb(image);
        debug!(
            original = format!("{}x{}", orig_w, orig_h),
            output = format!("{}x{}", rgb.width(), rgb.height()),
            "Image normalized for classifier"
        );
        rgb
    }
}

/// Convert any color mode to 3-channel RGB, compositing alpha over white
fn flatten_to_rgb(image: DynamicImage) -> RgbImage {
    if !image.color().has_alpha() {
        return image.to_rgb8();
    }

    let rgba = image.to_rgba8();
    let mut out = RgbImage::new(rgba.width(), rgba.height());
    for (x, y, pixel) in rgba.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        let alpha = a as u32;
        let blend = |c: u8| ((c as u32 * alpha + 255 * (255 - alpha) + 127) / 255) as u8;
        out.put_pixel(x, y, Rgb([blend(r), blend(g), blend(b)]));
    }
    out
}
