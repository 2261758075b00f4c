//! ONNX-backed implementations of the model-stage traits.

pub mod classifier;
pub mod segmenter;

pub use classifier::OrtClassifier;
pub use segmenter::OrtSegmenter;

use crate::core::constants::RASTER_SIZE;
use crate::core::{Tensor3D, TriageError};

/// Checks a raster against the `(256, 256, channels)` model input contract.
///
/// A mismatch is a programming-contract violation, not a recoverable input
/// error: the raster is never resized or reshaped here.
///
/// # Errors
///
/// Returns [`TriageError::Inference`] naming the operation and both shapes.
pub fn ensure_raster_shape(
    raster: &Tensor3D,
    channels: usize,
    operation: &str,
) -> Result<(), TriageError> {
    let side = RASTER_SIZE as usize;
    let (height, width, actual_channels) = raster.dim();
    if (height, width, actual_channels) != (side, side, channels) {
        return Err(TriageError::shape_mismatch(
            operation,
            &[side, side, channels],
            &[height, width, actual_channels],
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::{MASK_CHANNELS, RGB_CHANNELS};
    use ndarray::Array3;

    #[test]
    fn test_matching_shape_passes() {
        let raster = Array3::zeros((256, 256, 3));
        assert!(ensure_raster_shape(&raster, RGB_CHANNELS, "segmentation input").is_ok());
    }

    #[test]
    fn test_undersized_raster_is_a_contract_violation() {
        let raster = Array3::zeros((128, 128, 3));
        let err = ensure_raster_shape(&raster, RGB_CHANNELS, "segmentation input").unwrap_err();
        assert!(matches!(err, TriageError::Inference { .. }));
    }

    #[test]
    fn test_channel_count_mismatch_is_a_contract_violation() {
        let raster = Array3::zeros((256, 256, 3));
        let err = ensure_raster_shape(&raster, MASK_CHANNELS, "classification input").unwrap_err();
        assert!(matches!(err, TriageError::Inference { .. }));
    }
}
