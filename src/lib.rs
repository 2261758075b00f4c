//! # sono-triage
//!
//! Two-stage ultrasound triage over ONNX models: a pretrained segmentation
//! model predicts a soft lesion mask, the mask is relayed through an 8-bit
//! quantization round trip on disk, and a pretrained classifier maps the
//! relayed mask to one of three diagnoses: `benign`, `malignant`, `normal`.
//!
//! The quantization round trip is load-bearing, not incidental: the
//! classifier was trained on quantized mask images rather than raw float
//! masks, and the relay reproduces that distribution at inference time.
//!
//! ## Modules
//!
//! * [`core`] - Errors, configuration, labels, traits, and the ONNX engine
//! * [`pipeline`] - The orchestrator, the mask relay, and stats
//! * [`predictors`] - ONNX-backed segmenter and classifier
//! * [`processors`] - Raster normalization and mask quantization
//! * [`utils`] - Image I/O helpers
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sono_triage::{TriageConfig, TriagePipeline};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = TriageConfig::new("models/segmentor.onnx", "models/classifier.onnx");
//! let pipeline = TriagePipeline::from_config(&config)?;
//!
//! let diagnosis = pipeline.predict("uploads/scan_0041.png")?;
//! println!("{diagnosis}");
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod pipeline;
pub mod predictors;
pub mod processors;
pub mod utils;

pub use crate::core::{
    init_tracing, ClassScores, Diagnosis, Tensor2D, Tensor3D, Tensor4D, TriageConfig, TriageError,
};
pub use pipeline::{MaskRelay, PipelineStats, TriagePipeline};
pub use predictors::{OrtClassifier, OrtSegmenter};
pub use processors::RasterNormalizer;
