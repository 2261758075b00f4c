//! The core module of the triage pipeline.
//!
//! This module contains the fundamental components of the pipeline:
//! - Configuration management
//! - Constants used throughout the pipeline
//! - Error handling
//! - Inference engine integration
//! - Diagnostic labels and score selection
//! - Traits defining the model-stage seams
//!
//! It also provides re-exports of commonly used types for convenience.

pub mod config;
pub mod constants;
pub mod errors;
pub mod inference;
pub mod labels;
pub mod traits;

/// A 2-D f32 tensor, used for soft masks.
pub type Tensor2D = ndarray::Array2<f32>;
/// A 3-D f32 tensor in HWC layout, used for normalized rasters.
pub type Tensor3D = ndarray::Array3<f32>;
/// A 4-D f32 tensor with a leading batch axis, as consumed by the models.
pub type Tensor4D = ndarray::Array4<f32>;

pub use config::TriageConfig;
pub use constants::*;
pub use errors::TriageError;
pub use inference::{load_session, OrtInfer};
pub use labels::{ClassScores, Diagnosis};
pub use traits::{Classifier, Segmenter};

/// Initializes the tracing subscriber for logging.
///
/// Sets up the tracing subscriber with environment filter and formatting
/// layer. Typically called once at the start of an application.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();
}
