//! Pipeline orchestration.

pub mod mask_relay;
pub mod stats;
pub mod triage;

pub use mask_relay::MaskRelay;
pub use stats::PipelineStats;
pub use triage::TriagePipeline;
