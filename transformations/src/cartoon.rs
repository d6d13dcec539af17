use std::path::Path;
use std::sync::Arc;

use image::{imageops, DynamicImage, GrayImage, Rgba, RgbaImage};

use crate::device::Device;
use crate::error::{Result, TransformationError};
use crate::model::ModelVariant;
use crate::weights::{StyleWeights, WeightStore};

/// A model that turns a photo into a cartoon.
///
/// Implementations own their weight loading and caching; callers only pass the
/// folder the weights live in.
pub trait Cartooniser: Send + Sync {
    fn cartoonise(&self, image: &DynamicImage, weights_dir: &Path, device: Device)
        -> Result<DynamicImage>;
}

/// CPU reference cartooniser: smoothing, colour quantisation and edge inking,
/// tuned by the variant's weights file.
pub struct FilterCartooniser {
    variant: ModelVariant,
    weights: Arc<WeightStore>,
}

impl FilterCartooniser {
    pub fn new(variant: ModelVariant, weights: Arc<WeightStore>) -> Self {
        Self { variant, weights }
    }
}

impl Cartooniser for FilterCartooniser {
    fn cartoonise(
        &self,
        image: &DynamicImage,
        weights_dir: &Path,
        device: Device,
    ) -> Result<DynamicImage> {
        if device != Device::Cpu {
            return Err(TransformationError::UnsupportedDevice(device));
        }
        if image.width() == 0 || image.height() == 0 {
            return Err(TransformationError::InvalidInput(format!(
                "image has no pixels ({}x{})",
                image.width(),
                image.height()
            )));
        }

        let weights = self.weights.load(weights_dir, self.variant)?;
        log::debug!(
            "Cartoonising {}x{} image with {}",
            image.width(),
            image.height(),
            self.variant
        );

        Ok(DynamicImage::ImageRgba8(stylise(&image.to_rgba8(), &weights)))
    }
}

fn stylise(source: &RgbaImage, weights: &StyleWeights) -> RgbaImage {
    let smoothed = if weights.blur_sigma > 0.0 {
        imageops::blur(source, weights.blur_sigma)
    } else {
        source.clone()
    };
    let edges = sobel_magnitude(&imageops::grayscale(&smoothed));
    let step = 255.0 / f32::from(weights.levels - 1);

    RgbaImage::from_fn(source.width(), source.height(), |x, y| {
        let Rgba([r, g, b, a]) = *smoothed.get_pixel(x, y);
        let [r, g, b] = saturate([r, g, b], weights.saturation);
        let ink = if edges[(y * source.width() + x) as usize] > weights.edge_threshold {
            1.0 - weights.edge_strength
        } else {
            1.0
        };
        let shade = |channel: f32| ((channel / step).round() * step * ink).clamp(0.0, 255.0) as u8;
        Rgba([shade(r), shade(g), shade(b), a])
    })
}

fn saturate([r, g, b]: [u8; 3], amount: f32) -> [f32; 3] {
    let (r, g, b) = (f32::from(r), f32::from(g), f32::from(b));
    let luma = 0.299 * r + 0.587 * g + 0.114 * b;
    [
        luma + (r - luma) * amount,
        luma + (g - luma) * amount,
        luma + (b - luma) * amount,
    ]
}

/// Sobel gradient magnitude per pixel, row-major. Borders are clamped.
fn sobel_magnitude(gray: &GrayImage) -> Vec<f32> {
    let (width, height) = gray.dimensions();
    let at = |x: i64, y: i64| -> f32 {
        let x = x.clamp(0, i64::from(width) - 1) as u32;
        let y = y.clamp(0, i64::from(height) - 1) as u32;
        f32::from(gray.get_pixel(x, y).0[0])
    };

    let mut magnitudes = Vec::with_capacity((width * height) as usize);
    for y in 0..i64::from(height) {
        for x in 0..i64::from(width) {
            let gx = (at(x + 1, y - 1) + 2.0 * at(x + 1, y) + at(x + 1, y + 1))
                - (at(x - 1, y - 1) + 2.0 * at(x - 1, y) + at(x - 1, y + 1));
            let gy = (at(x - 1, y + 1) + 2.0 * at(x, y + 1) + at(x + 1, y + 1))
                - (at(x - 1, y - 1) + 2.0 * at(x, y - 1) + at(x + 1, y - 1));
            magnitudes.push((gx * gx + gy * gy).sqrt());
        }
    }
    magnitudes
}
