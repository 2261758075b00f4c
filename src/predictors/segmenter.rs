//! Segmentation model wrapper.

use crate::core::constants::{RASTER_SIZE, RGB_CHANNELS};
use crate::core::{OrtInfer, Segmenter, Tensor2D, Tensor3D, TriageError};
use ndarray::{s, Axis};
use std::path::Path;
use tracing::debug;

use super::ensure_raster_shape;

/// Pretrained segmentation model behind an ONNX session pool.
///
/// Maps a `(256, 256, 3)` normalized scan to a `(256, 256)` soft mask. The
/// session pool is created at construction and never mutated afterwards.
#[derive(Debug)]
pub struct OrtSegmenter {
    infer: OrtInfer,
}

impl OrtSegmenter {
    /// Loads the segmentation model with a single session.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::ModelLoad`] if the session cannot be created.
    pub fn new(model_path: impl AsRef<Path>) -> Result<Self, TriageError> {
        Ok(Self {
            infer: OrtInfer::new(model_path)?,
        })
    }

    /// Loads the segmentation model with a pool of sessions for concurrent use.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::ModelLoad`] if any session cannot be created.
    pub fn with_pool(model_path: impl AsRef<Path>, pool_size: usize) -> Result<Self, TriageError> {
        Ok(Self {
            infer: OrtInfer::with_pool(model_path, pool_size)?,
        })
    }
}

impl Segmenter for OrtSegmenter {
    fn segment(&self, rgb: &Tensor3D) -> Result<Tensor2D, TriageError> {
        ensure_raster_shape(rgb, RGB_CHANNELS, "segmentation input")?;

        let batched = rgb.view().insert_axis(Axis(0)).to_owned();
        debug!("running '{}' forward pass", self.infer.model_name());
        let output = self.infer.infer_4d(&batched)?;

        let side = RASTER_SIZE as usize;
        let (batch, height, width, channels) = output.dim();
        if batch != 1 || height != side || width != side || channels < 1 {
            return Err(TriageError::shape_mismatch(
                "segmentation output",
                &[1, side, side, 1],
                &[batch, height, width, channels],
            ));
        }

        // First output channel only, no thresholding: the downstream
        // quantization consumes the soft values.
        Ok(output.slice(s![0, .., .., 0]).to_owned())
    }
}
