//! Helpers for working directly with ONNX Runtime sessions.

use crate::core::errors::TriageError;
use ort::logging::LogLevel;
use ort::session::Session;
use std::path::Path;

pub fn load_session(model_path: impl AsRef<Path>) -> Result<Session, TriageError> {
    let path = model_path.as_ref();
    let session = Session::builder()
        .and_then(|b| b.with_log_level(LogLevel::Error))
        .and_then(|b| b.commit_from_file(path))
        .map_err(|e| {
            TriageError::model_load_error(path, "failed to create ONNX session", Some(e))
        })?;
    Ok(session)
}
