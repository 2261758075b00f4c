//! Core ONNX Runtime inference engine with a pooled-session execution path.
//!
//! Sessions are created once at construction and only read afterwards;
//! concurrent forward passes round-robin across the pool, so a pool size
//! above one lets independent invocations run without queueing on a single
//! session lock.

use crate::core::errors::TriageError;
use crate::core::{Tensor2D, Tensor4D};
use ndarray::{ArrayView2, ArrayView4};
use ort::session::Session;
use ort::value::TensorRef;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::session::load_session;

/// Input tensor names probed when the model does not use a conventional one.
const COMMON_INPUT_NAMES: [&str; 6] = ["x", "input", "input_1", "images", "data", "image"];

pub struct OrtInfer {
    sessions: Vec<Mutex<Session>>,
    next_idx: AtomicUsize,
    input_name: String,
    output_name: Option<String>,
    model_path: PathBuf,
    model_name: String,
}

impl std::fmt::Debug for OrtInfer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrtInfer")
            .field("sessions", &self.sessions.len())
            .field("input_name", &self.input_name)
            .field("output_name", &self.output_name)
            .field("model_path", &self.model_path)
            .field("model_name", &self.model_name)
            .finish()
    }
}

impl OrtInfer {
    /// Creates an inference engine with a single session.
    pub fn new(model_path: impl AsRef<Path>) -> Result<Self, TriageError> {
        Self::with_pool(model_path, 1)
    }

    /// Creates an inference engine backed by a pool of identical sessions.
    ///
    /// The first session is used to discover the input tensor name: the
    /// conventional names are probed first, then the model's first declared
    /// input is taken as-is. A `pool_size` of zero is treated as one.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::ModelLoad`] if any session cannot be created
    /// or the model declares no inputs.
    pub fn with_pool(model_path: impl AsRef<Path>, pool_size: usize) -> Result<Self, TriageError> {
        let path = model_path.as_ref();
        let pool_size = pool_size.max(1);

        let first_session = load_session(path)?;
        let available_inputs: Vec<String> = first_session
            .inputs
            .iter()
            .map(|input| input.name.clone())
            .collect();
        let input_name = COMMON_INPUT_NAMES
            .iter()
            .find(|&&name| available_inputs.iter().any(|input| input == name))
            .map(|s| (*s).to_string())
            .or_else(|| available_inputs.first().cloned())
            .ok_or_else(|| {
                TriageError::model_load_error(
                    path,
                    "model declares no input tensors",
                    None::<ort::Error>,
                )
            })?;

        let mut sessions = Vec::with_capacity(pool_size);
        sessions.push(Mutex::new(first_session));
        for _ in 1..pool_size {
            sessions.push(Mutex::new(load_session(path)?));
        }

        let model_name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown_model")
            .to_string();

        Ok(OrtInfer {
            sessions,
            next_idx: AtomicUsize::new(0),
            input_name,
            output_name: None,
            model_path: path.to_path_buf(),
            model_name,
        })
    }

    /// Returns the model path associated with this inference engine.
    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    /// Returns the model name associated with this inference engine.
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Returns the configured or discovered output tensor name.
    fn get_output_name(&self) -> Result<String, TriageError> {
        if let Some(ref name) = self.output_name {
            Ok(name.clone())
        } else {
            let session = self.sessions[0]
                .lock()
                .map_err(|_| TriageError::inference("failed to acquire session lock"))?;
            session
                .outputs
                .first()
                .map(|output| output.name.clone())
                .ok_or_else(|| {
                    TriageError::inference(format!(
                        "model '{}' declares no output tensors",
                        self.model_name
                    ))
                })
        }
    }

    fn run_with_processor<T>(
        &self,
        x: &Tensor4D,
        processor: impl FnOnce(&[i64], &[f32]) -> Result<T, TriageError>,
    ) -> Result<T, TriageError> {
        let input_shape = x.shape().to_vec();
        let output_name = self.get_output_name()?;

        let input_tensor = TensorRef::from_array_view(x.view()).map_err(|e| {
            TriageError::inference(format!(
                "model '{}': failed to convert input tensor with shape {:?}: {}",
                self.model_name, input_shape, e
            ))
        })?;
        let inputs = ort::inputs![self.input_name.as_str() => input_tensor];

        let idx = self.next_idx.fetch_add(1, Ordering::Relaxed) % self.sessions.len();
        let mut session_guard = self.sessions[idx]
            .lock()
            .map_err(|_| TriageError::inference("failed to acquire session lock"))?;

        let outputs = session_guard.run(inputs)?;
        let (output_shape, output_data) = outputs[output_name.as_str()]
            .try_extract_tensor::<f32>()
            .map_err(|e| {
                TriageError::inference(format!(
                    "model '{}': failed to extract output tensor '{}' as f32: {}",
                    self.model_name, output_name, e
                ))
            })?;

        processor(output_shape, output_data)
    }

    /// Runs inference and returns the 4-D output tensor.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::Inference`] if the output is not 4-D or its
    /// data length does not match the declared shape.
    pub fn infer_4d(&self, x: &Tensor4D) -> Result<Tensor4D, TriageError> {
        let model_name = &self.model_name;
        self.run_with_processor(x, move |output_shape, output_data| {
            if output_shape.len() != 4 {
                return Err(TriageError::inference(format!(
                    "model '{model_name}': expected 4D output tensor, got {}D with shape {:?}",
                    output_shape.len(),
                    output_shape
                )));
            }

            let dims = (
                output_shape[0] as usize,
                output_shape[1] as usize,
                output_shape[2] as usize,
                output_shape[3] as usize,
            );
            let expected_len = dims.0 * dims.1 * dims.2 * dims.3;
            if output_data.len() != expected_len {
                return Err(TriageError::inference(format!(
                    "model '{model_name}': output data size mismatch, expected {expected_len}, got {}",
                    output_data.len()
                )));
            }

            let array_view =
                ArrayView4::from_shape(dims, output_data).map_err(TriageError::Tensor)?;
            Ok(array_view.to_owned())
        })
    }

    /// Runs inference and returns the 2-D output tensor (batch, classes).
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::Inference`] if the output is not 2-D or its
    /// data length does not match the declared shape.
    pub fn infer_2d(&self, x: &Tensor4D) -> Result<Tensor2D, TriageError> {
        let model_name = &self.model_name;
        self.run_with_processor(x, move |output_shape, output_data| {
            if output_shape.len() != 2 {
                return Err(TriageError::inference(format!(
                    "model '{model_name}': expected 2D output tensor, got {}D with shape {:?}",
                    output_shape.len(),
                    output_shape
                )));
            }

            let dims = (output_shape[0] as usize, output_shape[1] as usize);
            if output_data.len() != dims.0 * dims.1 {
                return Err(TriageError::inference(format!(
                    "model '{model_name}': output data size mismatch, expected {}, got {}",
                    dims.0 * dims.1,
                    output_data.len()
                )));
            }

            let array_view =
                ArrayView2::from_shape(dims, output_data).map_err(TriageError::Tensor)?;
            Ok(array_view.to_owned())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_pool_fails_on_missing_model() {
        let result = OrtInfer::with_pool("/nonexistent/model.onnx", 2);
        assert!(matches!(result, Err(TriageError::ModelLoad { .. })));
    }

    #[test]
    fn test_new_fails_on_missing_model() {
        assert!(OrtInfer::new("dummy_path.onnx").is_err());
    }
}
