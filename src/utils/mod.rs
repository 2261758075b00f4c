//! Utility functions shared across the triage pipeline.

pub mod image;

pub use image::{dynamic_to_gray, dynamic_to_rgb, has_allowed_extension, load_image};
