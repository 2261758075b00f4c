//! Pipeline configuration.

use crate::core::constants::DEFAULT_SESSION_POOL_SIZE;
use crate::core::errors::TriageError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the triage pipeline.
///
/// Holds the paths to the two pretrained model files, the directory used for
/// the per-invocation quantized mask files, and the size of the ONNX session
/// pool backing each model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriageConfig {
    /// Path to the segmentation model file (ONNX).
    pub segmentation_model_path: PathBuf,
    /// Path to the classification model file (ONNX).
    pub classification_model_path: PathBuf,
    /// Directory the mask relay writes its temporary rasters to.
    #[serde(default = "default_temp_dir")]
    pub temp_dir: PathBuf,
    /// Number of pooled sessions per model, to allow concurrent predictions (>= 1).
    #[serde(default = "default_session_pool_size")]
    pub session_pool_size: usize,
}

fn default_temp_dir() -> PathBuf {
    std::env::temp_dir()
}

fn default_session_pool_size() -> usize {
    DEFAULT_SESSION_POOL_SIZE
}

impl TriageConfig {
    /// Creates a configuration from the two model paths, with defaults for
    /// everything else.
    pub fn new(
        segmentation_model_path: impl Into<PathBuf>,
        classification_model_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            segmentation_model_path: segmentation_model_path.into(),
            classification_model_path: classification_model_path.into(),
            temp_dir: default_temp_dir(),
            session_pool_size: default_session_pool_size(),
        }
    }

    /// Sets the temporary directory for mask relay files.
    pub fn with_temp_dir(mut self, temp_dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = temp_dir.into();
        self
    }

    /// Sets the per-model session pool size.
    pub fn with_session_pool_size(mut self, session_pool_size: usize) -> Self {
        self.session_pool_size = session_pool_size;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::Config`] if either model file does not exist,
    /// the temp directory does not exist, or the session pool size is zero.
    pub fn validate(&self) -> Result<(), TriageError> {
        if !self.segmentation_model_path.is_file() {
            return Err(TriageError::config(format!(
                "segmentation model not found: {}",
                self.segmentation_model_path.display()
            )));
        }
        if !self.classification_model_path.is_file() {
            return Err(TriageError::config(format!(
                "classification model not found: {}",
                self.classification_model_path.display()
            )));
        }
        if !self.temp_dir.is_dir() {
            return Err(TriageError::config(format!(
                "temp dir is not a directory: {}",
                self.temp_dir.display()
            )));
        }
        if self.session_pool_size == 0 {
            return Err(TriageError::config("session pool size must be >= 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_missing_models() {
        let config = TriageConfig::new("/nonexistent/seg.onnx", "/nonexistent/cls.onnx");
        let err = config.validate().unwrap_err();
        assert!(matches!(err, TriageError::Config { .. }));
    }

    #[test]
    fn test_validate_rejects_zero_pool_size() {
        let dir = tempfile::tempdir().unwrap();
        let seg = dir.path().join("seg.onnx");
        let cls = dir.path().join("cls.onnx");
        std::fs::write(&seg, b"stub").unwrap();
        std::fs::write(&cls, b"stub").unwrap();

        let config = TriageConfig::new(&seg, &cls).with_session_pool_size(0);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("pool size"));
    }

    #[test]
    fn test_defaults_fill_in_on_deserialization() {
        let config: TriageConfig = serde_json::from_str(
            r#"{
                "segmentation_model_path": "models/segmentor.onnx",
                "classification_model_path": "models/classifier.onnx"
            }"#,
        )
        .unwrap();
        assert_eq!(config.session_pool_size, 1);
        assert_eq!(config.temp_dir, std::env::temp_dir());
    }
}
