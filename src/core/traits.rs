//! Model-stage traits.
//!
//! The two pretrained models enter the pipeline as injected handles behind
//! these traits rather than as process globals. Both implementations in
//! [`crate::predictors`] are read-only after construction and safe to share
//! across request threads; test suites substitute lightweight doubles.

use crate::core::errors::TriageError;
use crate::core::labels::ClassScores;
use crate::core::{Tensor2D, Tensor3D};

/// A pretrained model mapping a normalized RGB raster to a soft mask.
pub trait Segmenter: Send + Sync {
    /// Runs one forward pass over a `(256, 256, 3)` raster in `[0, 1]` and
    /// returns the `(256, 256)` per-pixel foreground likelihood, unclipped
    /// and unthresholded.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::Inference`] if the input shape does not match
    /// the model's contract; this is fatal to the invocation, never a resize.
    fn segment(&self, rgb: &Tensor3D) -> Result<Tensor2D, TriageError>;
}

/// A pretrained model mapping a relayed mask raster to per-class scores.
pub trait Classifier: Send + Sync {
    /// Runs one forward pass over a `(256, 256, 1)` raster in `[0, 1]` and
    /// returns the scores in fixed class order.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::Inference`] on a shape-contract violation.
    fn classify(&self, mask: &Tensor3D) -> Result<ClassScores, TriageError>;
}
