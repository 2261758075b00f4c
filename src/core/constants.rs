//! Constants shared across the triage pipeline.

/// Side length of every raster the models consume, in pixels.
pub const RASTER_SIZE: u32 = 256;

/// Channel count of the segmentation model input.
pub const RGB_CHANNELS: usize = 3;

/// Channel count of the classifier input (a relayed mask).
pub const MASK_CHANNELS: usize = 1;

/// Number of diagnostic classes.
pub const NUM_CLASSES: usize = 3;

/// Default number of pooled ONNX sessions per model.
pub const DEFAULT_SESSION_POOL_SIZE: usize = 1;

/// Prefix for the per-invocation quantized mask files.
pub const MASK_FILE_PREFIX: &str = "mask-";
