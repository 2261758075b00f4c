//! Soft-mask quantization.
//!
//! The classifier was trained on 8-bit grayscale mask images, not raw float
//! masks, so the pipeline reproduces that distribution at inference time by
//! encoding each soft mask through this codec before classification. The
//! mapping is `round(clamp(v, 0, 1) * 255)` per sample; this is the one
//! place where mask values outside `[0, 1]` get clipped.

use crate::core::{Tensor2D, TriageError};
use image::{GrayImage, ImageFormat, Luma};
use std::path::Path;

/// Quantizes a soft mask into an 8-bit grayscale raster.
pub fn quantize_mask(mask: &Tensor2D) -> GrayImage {
    let (height, width) = mask.dim();
    let mut raster = GrayImage::new(width as u32, height as u32);
    for ((y, x), &value) in mask.indexed_iter() {
        let level = (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        raster.put_pixel(x as u32, y as u32, Luma([level]));
    }
    raster
}

/// Quantizes a soft mask and writes it to `path` as a grayscale PNG.
///
/// # Errors
///
/// Returns [`TriageError::Encode`] if the raster cannot be encoded and
/// [`TriageError::Io`] if the file cannot be written.
pub fn write_mask_png(mask: &Tensor2D, path: &Path) -> Result<(), TriageError> {
    quantize_mask(mask)
        .save_with_format(path, ImageFormat::Png)
        .map_err(TriageError::encode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    #[test]
    fn test_all_zero_mask_quantizes_to_zero() {
        let raster = quantize_mask(&Array2::zeros((256, 256)));
        assert!(raster.pixels().all(|p| p.0[0] == 0));
    }

    #[test]
    fn test_all_one_mask_quantizes_to_full_scale() {
        let raster = quantize_mask(&Array2::from_elem((256, 256), 1.0));
        assert!(raster.pixels().all(|p| p.0[0] == 255));
    }

    #[test]
    fn test_out_of_range_values_clip() {
        let mask = Array2::from_shape_vec((1, 4), vec![-0.5, 0.0, 1.0, 1.7]).unwrap();
        let raster = quantize_mask(&mask);
        let levels: Vec<u8> = raster.pixels().map(|p| p.0[0]).collect();
        assert_eq!(levels, [0, 0, 255, 255]);
    }

    #[test]
    fn test_midpoint_rounds() {
        let mask = Array2::from_elem((1, 1), 0.5);
        // 0.5 * 255 = 127.5 rounds away from zero
        assert_eq!(quantize_mask(&mask).get_pixel(0, 0).0[0], 128);
    }

    #[test]
    fn test_write_mask_png_round_trips_levels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mask.png");
        let mask = Array2::from_shape_fn((8, 8), |(y, x)| (y * 8 + x) as f32 / 63.0);
        write_mask_png(&mask, &path).unwrap();

        let reloaded = image::open(&path).unwrap().to_luma8();
        for ((y, x), &value) in mask.indexed_iter() {
            let expected = (value.clamp(0.0, 1.0) * 255.0).round() as u8;
            assert_eq!(reloaded.get_pixel(x as u32, y as u32).0[0], expected);
        }
    }
}
