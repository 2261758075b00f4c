//! The mask relay: a deliberate quantization round trip on disk.
//!
//! The soft mask is encoded to an 8-bit grayscale raster in a temporary file
//! and immediately reloaded through the same loader path the scan itself went
//! through. Precision drops from float32 to 8 bits at this boundary, which
//! matches the input distribution the classifier was trained on; skipping the
//! file round trip would change what the classifier sees, so it stays.
//!
//! Each invocation gets its own uniquely named file, owned by a guard whose
//! drop removes it on success, on failure, and on unwind. Concurrent
//! invocations therefore never read or delete each other's raster, and no
//! raster outlives its invocation.

use crate::core::constants::MASK_FILE_PREFIX;
use crate::core::{Tensor2D, Tensor3D, TriageError};
use crate::processors::{write_mask_png, RasterNormalizer};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Relays a soft mask through the on-disk quantization round trip.
#[derive(Debug)]
pub struct MaskRelay {
    temp_dir: PathBuf,
    normalizer: RasterNormalizer,
}

impl MaskRelay {
    /// Creates a relay writing into the given temporary directory.
    pub fn new(temp_dir: impl Into<PathBuf>) -> Self {
        Self {
            temp_dir: temp_dir.into(),
            normalizer: RasterNormalizer::grayscale(),
        }
    }

    /// Runs the round trip: quantize, persist, reload as a `(256, 256, 1)`
    /// raster re-normalized to `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::Io`] if the temporary file cannot be created,
    /// [`TriageError::Encode`] if the raster cannot be written, and the
    /// loader's errors if the reload fails. The temporary file is removed on
    /// every one of these paths.
    pub fn relay(&self, mask: &Tensor2D) -> Result<Tensor3D, TriageError> {
        self.run_scoped(mask, |path| self.normalizer.load(path))
    }

    /// Encodes the mask into a guard-owned temporary file and hands the path
    /// to `reload`. The guard drops when this function returns, removing the
    /// file regardless of which step failed.
    fn run_scoped<T>(
        &self,
        mask: &Tensor2D,
        reload: impl FnOnce(&Path) -> Result<T, TriageError>,
    ) -> Result<T, TriageError> {
        let file = tempfile::Builder::new()
            .prefix(MASK_FILE_PREFIX)
            .suffix(".png")
            .tempfile_in(&self.temp_dir)?;
        debug!("relaying mask through {:?}", file.path());

        write_mask_png(mask, file.path())?;
        reload(file.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    fn count_entries(dir: &Path) -> usize {
        std::fs::read_dir(dir).unwrap().count()
    }

    #[test]
    fn test_relay_output_shape_and_cleanup() {
        let dir = tempfile::tempdir().unwrap();
        let relay = MaskRelay::new(dir.path());

        let mask = Array2::from_shape_fn((256, 256), |(y, x)| ((y + x) % 256) as f32 / 255.0);
        let raster = relay.relay(&mask).unwrap();

        assert_eq!(raster.dim(), (256, 256, 1));
        assert_eq!(count_entries(dir.path()), 0);
    }

    #[test]
    fn test_constant_masks_survive_the_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let relay = MaskRelay::new(dir.path());

        let zeros = relay.relay(&Array2::zeros((256, 256))).unwrap();
        assert!(zeros.iter().all(|&v| v.abs() < 1e-3));

        let ones = relay.relay(&Array2::from_elem((256, 256), 1.0)).unwrap();
        assert!(ones.iter().all(|&v| (v - 1.0).abs() < 1e-3));
    }

    #[test]
    fn test_round_trip_stays_within_quantization_error() {
        let dir = tempfile::tempdir().unwrap();
        let relay = MaskRelay::new(dir.path());

        let mask = Array2::from_shape_fn((256, 256), |(y, _)| y as f32 / 255.0);
        let raster = relay.relay(&mask).unwrap();

        for ((y, x, _), &v) in raster.indexed_iter() {
            let original = mask[[y, x]];
            assert!(
                (v - original).abs() <= 1.0 / 255.0,
                "relayed value {v} drifted from {original} at ({y}, {x})"
            );
        }
    }

    #[test]
    fn test_induced_reload_failure_still_removes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let relay = MaskRelay::new(dir.path());
        let mask = Array2::from_elem((256, 256), 0.5);

        let mut seen_path = None;
        let result: Result<(), TriageError> = relay.run_scoped(&mask, |path| {
            assert!(path.exists(), "mask file should exist during the reload step");
            seen_path = Some(path.to_path_buf());
            Err(TriageError::inference("injected reload failure"))
        });

        assert!(result.is_err());
        let seen_path = seen_path.unwrap();
        assert!(!seen_path.exists(), "mask file must not outlive the call");
        assert_eq!(count_entries(dir.path()), 0);
    }

    #[test]
    fn test_concurrent_relays_use_distinct_files() {
        let dir = tempfile::tempdir().unwrap();
        let relay = std::sync::Arc::new(MaskRelay::new(dir.path()));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let relay = relay.clone();
                std::thread::spawn(move || {
                    let level = (i * 32) as f32 / 255.0;
                    let raster = relay.relay(&Array2::from_elem((256, 256), level)).unwrap();
                    // every sample must come from this invocation's own file
                    let expected = (level * 255.0).round() / 255.0;
                    assert!(raster.iter().all(|&v| (v - expected).abs() < 1e-3));
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(count_entries(dir.path()), 0);
    }
}
