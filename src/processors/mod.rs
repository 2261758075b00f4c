//! Raster processing between the pipeline stages.
//!
//! - [`normalization`] turns decoded images into the fixed-size float rasters
//!   the models consume.
//! - [`mask_codec`] quantizes soft masks down to 8-bit grayscale rasters.

pub mod mask_codec;
pub mod normalization;

pub use mask_codec::{quantize_mask, write_mask_png};
pub use normalization::{ColorMode, RasterNormalizer};
