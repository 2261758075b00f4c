//! Image normalization for model input.
//!
//! Both models consume `(256, 256, c)` float rasters in `[0, 1]`, channels
//! last. The normalizer owns the full decode-to-tensor path: resize with a
//! fixed deterministic filter, convert color mode, scale samples by 1/255.

use crate::core::constants::{MASK_CHANNELS, RASTER_SIZE, RGB_CHANNELS};
use crate::core::{Tensor3D, TriageError};
use crate::utils::{dynamic_to_gray, dynamic_to_rgb, load_image};
use image::imageops::FilterType;
use image::DynamicImage;
use std::path::Path;

/// Color mode of a normalized raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    /// Single-channel grayscale, used for relayed masks.
    Grayscale,
    /// Three-channel RGB, used for input scans.
    Rgb,
}

impl ColorMode {
    /// Returns the channel count of this mode.
    pub fn channels(&self) -> usize {
        match self {
            ColorMode::Grayscale => MASK_CHANNELS,
            ColorMode::Rgb => RGB_CHANNELS,
        }
    }
}

/// Normalizes images into fixed-size float rasters.
#[derive(Debug, Clone)]
pub struct RasterNormalizer {
    mode: ColorMode,
    size: (u32, u32),
}

impl RasterNormalizer {
    /// Creates a normalizer for the given color mode and target size.
    pub fn new(mode: ColorMode, size: (u32, u32)) -> Self {
        Self { mode, size }
    }

    /// Normalizer for the segmentation model's RGB input.
    pub fn rgb() -> Self {
        Self::new(ColorMode::Rgb, (RASTER_SIZE, RASTER_SIZE))
    }

    /// Normalizer for the classifier's single-channel mask input.
    pub fn grayscale() -> Self {
        Self::new(ColorMode::Grayscale, (RASTER_SIZE, RASTER_SIZE))
    }

    /// Loads and normalizes an image file.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::Io`] for an unreadable path and
    /// [`TriageError::Decode`] for undecodable bytes.
    pub fn load(&self, path: &Path) -> Result<Tensor3D, TriageError> {
        let img = load_image(path)?;
        self.apply(&img)
    }

    /// Normalizes a decoded image.
    ///
    /// The output shape is exactly `(height, width, channels)` for the
    /// configured mode and size; every sample lies in `[0, 1]`.
    pub fn apply(&self, img: &DynamicImage) -> Result<Tensor3D, TriageError> {
        let (target_w, target_h) = self.size;
        let resized = img.resize_exact(target_w, target_h, FilterType::Lanczos3);

        let samples: Vec<f32> = match self.mode {
            ColorMode::Rgb => dynamic_to_rgb(&resized)
                .into_raw()
                .into_iter()
                .map(|v| f32::from(v) / 255.0)
                .collect(),
            ColorMode::Grayscale => dynamic_to_gray(&resized)
                .into_raw()
                .into_iter()
                .map(|v| f32::from(v) / 255.0)
                .collect(),
        };

        // Raw buffers are row-major HWC, matching the tensor layout directly.
        let tensor = Tensor3D::from_shape_vec(
            (target_h as usize, target_w as usize, self.mode.channels()),
            samples,
        )?;
        Ok(tensor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn uniform_image(width: u32, height: u32, level: u8) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(
            width,
            height,
            Rgb([level, level, level]),
        ))
    }

    #[test]
    fn test_rgb_output_shape_and_range() {
        let raster = RasterNormalizer::rgb()
            .apply(&uniform_image(300, 200, 200))
            .unwrap();
        assert_eq!(raster.dim(), (256, 256, 3));
        assert!(raster.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn test_grayscale_output_shape() {
        let raster = RasterNormalizer::grayscale()
            .apply(&uniform_image(256, 256, 17))
            .unwrap();
        assert_eq!(raster.dim(), (256, 256, 1));
    }

    #[test]
    fn test_uniform_image_normalizes_to_uniform_raster() {
        let raster = RasterNormalizer::rgb()
            .apply(&uniform_image(64, 64, 255))
            .unwrap();
        assert!(raster.iter().all(|&v| (v - 1.0).abs() < 1e-6));

        let raster = RasterNormalizer::rgb().apply(&uniform_image(64, 64, 0)).unwrap();
        assert!(raster.iter().all(|&v| v.abs() < 1e-6));
    }

    #[test]
    fn test_resampling_is_deterministic() {
        let mut img = RgbImage::new(100, 80);
        for (x, y, pixel) in img.enumerate_pixels_mut() {
            *pixel = Rgb([(x * 2) as u8, (y * 3) as u8, ((x + y) % 256) as u8]);
        }
        let img = DynamicImage::ImageRgb8(img);

        let normalizer = RasterNormalizer::rgb();
        let first = normalizer.apply(&img).unwrap();
        let second = normalizer.apply(&img).unwrap();
        assert_eq!(first, second);
    }
}
