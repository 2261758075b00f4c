//! The triage pipeline orchestrator.
//!
//! One invocation runs load, segment, relay, classify strictly in order and
//! selects the final diagnosis by argmax. The first stage error aborts the
//! remaining stages and propagates unchanged; the relay's temp-file cleanup
//! is ownership based and runs no matter where the invocation stopped. There
//! are no retries anywhere: inference over the same bytes is deterministic,
//! so a second attempt could only fail the same way.

use crate::core::{Classifier, Diagnosis, Segmenter, TriageConfig, TriageError};
use crate::pipeline::mask_relay::MaskRelay;
use crate::pipeline::stats::{PipelineStats, StatsManager};
use crate::predictors::{OrtClassifier, OrtSegmenter};
use crate::processors::RasterNormalizer;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// The two-stage triage pipeline.
///
/// Holds the two model handles (shared, read-only), the scan loader, and the
/// mask relay. Invocations are independent: everything produced during
/// `predict` is dropped when it returns, so one pipeline value can serve any
/// number of request threads concurrently.
pub struct TriagePipeline {
    segmenter: Arc<dyn Segmenter>,
    classifier: Arc<dyn Classifier>,
    loader: RasterNormalizer,
    relay: MaskRelay,
    stats: StatsManager,
}

impl TriagePipeline {
    /// Creates a pipeline from injected model handles.
    ///
    /// This is the seam test suites use to substitute model doubles; model
    /// loading lives in [`TriagePipeline::from_config`].
    pub fn new(
        segmenter: Arc<dyn Segmenter>,
        classifier: Arc<dyn Classifier>,
        temp_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            segmenter,
            classifier,
            loader: RasterNormalizer::rgb(),
            relay: MaskRelay::new(temp_dir),
            stats: StatsManager::default(),
        }
    }

    /// Creates a pipeline by loading both ONNX models.
    ///
    /// The models are loaded once here and shared read-only by every
    /// subsequent invocation.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::Config`] if the configuration is invalid and
    /// [`TriageError::ModelLoad`] if either model cannot be loaded.
    pub fn from_config(config: &TriageConfig) -> Result<Self, TriageError> {
        config.validate()?;

        info!(
            "loading segmentation model from {:?}",
            config.segmentation_model_path
        );
        let segmenter =
            OrtSegmenter::with_pool(&config.segmentation_model_path, config.session_pool_size)?;

        info!(
            "loading classification model from {:?}",
            config.classification_model_path
        );
        let classifier = OrtClassifier::with_pool(
            &config.classification_model_path,
            config.session_pool_size,
        )?;

        info!("triage pipeline initialized");
        Ok(Self::new(
            Arc::new(segmenter),
            Arc::new(classifier),
            config.temp_dir.clone(),
        ))
    }

    /// Runs one end-to-end triage invocation over the image at `path`.
    ///
    /// # Errors
    ///
    /// Propagates the first stage failure as-is; never falls back to a
    /// default diagnosis.
    pub fn predict(&self, image_path: impl AsRef<Path>) -> Result<Diagnosis, TriageError> {
        let path = image_path.as_ref();
        let result = self.run(path);
        self.stats.record(result.is_ok());
        result
    }

    fn run(&self, path: &Path) -> Result<Diagnosis, TriageError> {
        info!("starting triage for {:?}", path);

        let rgb = self.loader.load(path)?;
        debug!("scan normalized to {:?}", rgb.dim());

        let mask = self.segmenter.segment(&rgb)?;
        debug!("soft mask predicted");

        let relayed = self.relay.relay(&mask)?;
        debug!("mask relayed through quantization");

        let scores = self.classifier.classify(&relayed)?;
        let diagnosis = Diagnosis::from_scores(&scores);
        info!("triage for {:?} complete: {diagnosis} (scores {scores:?})", path);
        Ok(diagnosis)
    }

    /// Returns a snapshot of the invocation counters.
    pub fn stats(&self) -> PipelineStats {
        self.stats.snapshot()
    }
}
