//! ONNX Runtime integration.

mod ort_infer;
mod session;

pub use ort_infer::OrtInfer;
pub use session::load_session;
