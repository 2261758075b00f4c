//! Error types for the triage pipeline.
//!
//! Every failure in the core maps to one of the variants below and is
//! propagated to the caller as-is. Nothing is recovered inside the pipeline
//! and no error is ever coerced to a default diagnosis; the only local
//! recovery duty is the mask-relay temp-file cleanup, which is ownership
//! based and independent of the error path taken.

use thiserror::Error;

/// Errors produced by the triage pipeline.
#[derive(Error, Debug)]
pub enum TriageError {
    /// The input bytes are not a decodable image.
    #[error("image decode")]
    Decode(#[source] image::ImageError),

    /// The quantized mask raster could not be encoded.
    #[error("mask encode")]
    Encode(#[source] image::ImageError),

    /// A tensor shape contract was violated before a model call.
    ///
    /// This is a programming-contract violation, fatal to the invocation.
    #[error("inference contract: {message}")]
    Inference {
        /// Description of the violated contract.
        message: String,
    },

    /// A model file could not be loaded into an ONNX session.
    #[error("model load failed for '{model_path}': {reason}")]
    ModelLoad {
        /// Display form of the model path.
        model_path: String,
        /// What went wrong.
        reason: String,
        /// The underlying error, when one exists.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Invalid pipeline configuration.
    #[error("configuration: {message}")]
    Config {
        /// A message describing the configuration error.
        message: String,
    },

    /// Error from the ONNX Runtime session.
    #[error(transparent)]
    Session(#[from] ort::Error),

    /// Error from tensor operations.
    #[error("tensor operation")]
    Tensor(#[from] ndarray::ShapeError),

    /// IO error.
    #[error("io")]
    Io(#[from] std::io::Error),
}

impl TriageError {
    /// Creates an inference-contract error.
    pub fn inference(message: impl Into<String>) -> Self {
        Self::Inference {
            message: message.into(),
        }
    }

    /// Creates an inference-contract error for a tensor shape mismatch.
    ///
    /// # Arguments
    ///
    /// * `operation` - The operation whose input or output was malformed.
    /// * `expected` - The expected shape.
    /// * `actual` - The shape that was observed.
    pub fn shape_mismatch(operation: &str, expected: &[usize], actual: &[usize]) -> Self {
        Self::Inference {
            message: format!("{operation}: expected shape {expected:?}, got {actual:?}"),
        }
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates a model-load error with optional underlying cause.
    pub fn model_load_error(
        model_path: impl AsRef<std::path::Path>,
        reason: impl Into<String>,
        source: Option<impl std::error::Error + Send + Sync + 'static>,
    ) -> Self {
        Self::ModelLoad {
            model_path: model_path.as_ref().display().to_string(),
            reason: reason.into(),
            source: source.map(|e| Box::new(e) as _),
        }
    }

    /// Maps an image decoding failure, splitting I/O causes out of the
    /// decoder error so an unreadable path and undecodable bytes stay
    /// distinct.
    pub fn decode(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(io) => Self::Io(io),
            other => Self::Decode(other),
        }
    }

    /// Maps an image encoding failure, splitting I/O causes out the same way
    /// as [`TriageError::decode`].
    pub fn encode(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(io) => Self::Io(io),
            other => Self::Encode(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_splits_io_out_of_image_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = TriageError::decode(image::ImageError::IoError(io));
        assert!(matches!(err, TriageError::Io(_)));
    }

    #[test]
    fn test_shape_mismatch_message_carries_both_shapes() {
        let err = TriageError::shape_mismatch("segmentation input", &[256, 256, 3], &[128, 128, 3]);
        let text = err.to_string();
        assert!(text.contains("[256, 256, 3]"));
        assert!(text.contains("[128, 128, 3]"));
    }
}
