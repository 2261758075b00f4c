//! Classification model wrapper.

use crate::core::constants::{MASK_CHANNELS, NUM_CLASSES};
use crate::core::{ClassScores, Classifier, OrtInfer, Tensor3D, TriageError};
use ndarray::Axis;
use std::path::Path;
use tracing::debug;

use super::ensure_raster_shape;

/// Pretrained diagnosis classifier behind an ONNX session pool.
///
/// Maps a `(256, 256, 1)` relayed mask raster to softmax scores over the
/// fixed class order. Same shared-immutable session discipline as the
/// segmenter.
#[derive(Debug)]
pub struct OrtClassifier {
    infer: OrtInfer,
}

impl OrtClassifier {
    /// Loads the classification model with a single session.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::ModelLoad`] if the session cannot be created.
    pub fn new(model_path: impl AsRef<Path>) -> Result<Self, TriageError> {
        Ok(Self {
            infer: OrtInfer::new(model_path)?,
        })
    }

    /// Loads the classification model with a pool of sessions for concurrent use.
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

impl Classifier for OrtClassifier {
    fn classify(&self, mask: &Tensor3D) -> Result<ClassScores, TriageError> {
        ensure_raster_shape(mask, MASK_CHANNELS, "classification input")?;

        let batched = mask.view().insert_axis(Axis(0)).to_owned();
        debug!("running '{}' forward pass", self.infer.model_name());
        let output = self.infer.infer_2d(&batched)?;

        if output.dim() != (1, NUM_CLASSES) {
            return Err(TriageError::shape_mismatch(
                "classification output",
                &[1, NUM_CLASSES],
                &[output.dim().0, output.dim().1],
            ));
        }

        let mut scores = [0.0f32; NUM_CLASSES];
        for (dst, &src) in scores.iter_mut().zip(output.row(0).iter()) {
            *dst = src;
        }
        Ok(scores)
    }
}
