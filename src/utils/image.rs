//! Image loading and conversion helpers.
//!
//! This module provides the low-level image I/O used by the triage pipeline:
//! decoding an image file into a [`DynamicImage`], converting between color
//! modes, and checking upload extensions. Geometry and normalization live in
//! [`crate::processors`].

use crate::core::TriageError;
use image::{DynamicImage, GrayImage, RgbImage};
use std::path::Path;

/// File extensions accepted by the upload-facing collaborator.
///
/// The pipeline itself never rejects a readable image by extension; this
/// helper exists so callers can validate uploads before handing over a path.
pub const ALLOWED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];

/// Converts a `DynamicImage` to an 8-bit RGB image.
pub fn dynamic_to_rgb(img: &DynamicImage) -> RgbImage {
    img.to_rgb8()
}

/// Converts a `DynamicImage` to an 8-bit grayscale image.
pub fn dynamic_to_gray(img: &DynamicImage) -> GrayImage {
    img.to_luma8()
}

/// Loads an image from a file path.
///
/// A path that cannot be read at all surfaces as [`TriageError::Io`]; bytes
/// that are readable but not a decodable image surface as
/// [`TriageError::Decode`]. Neither is retried: decoding the same bytes again
/// is deterministic.
///
/// # Errors
///
/// Returns [`TriageError::Io`] if the file cannot be opened or read, and
/// [`TriageError::Decode`] if its contents are not a valid image.
pub fn load_image(path: &Path) -> Result<DynamicImage, TriageError> {
    image::open(path).map_err(TriageError::decode)
}

/// Returns true if the path carries one of the accepted upload extensions.
///
/// Comparison is case-insensitive; a path without an extension is rejected.
pub fn has_allowed_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            ALLOWED_EXTENSIONS.iter().any(|allowed| *allowed == ext)
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_image_missing_path_is_io() {
        let err = load_image(Path::new("/nonexistent/scan.png")).unwrap_err();
        assert!(matches!(err, TriageError::Io(_)));
    }

    #[test]
    fn test_load_image_garbage_bytes_is_decode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.png");
        std::fs::write(&path, b"not an image at all").unwrap();

        let err = load_image(&path).unwrap_err();
        assert!(matches!(err, TriageError::Decode(_)));
    }

    #[test]
    fn test_allowed_extensions() {
        assert!(has_allowed_extension(Path::new("scan.png")));
        assert!(has_allowed_extension(Path::new("scan.JPG")));
        assert!(has_allowed_extension(Path::new("a/b/scan.jpeg")));
        assert!(has_allowed_extension(Path::new("scan.gif")));
        assert!(!has_allowed_extension(Path::new("scan.bmp")));
        assert!(!has_allowed_extension(Path::new("scan")));
        assert!(!has_allowed_extension(Path::new(".png")));
    }
}
