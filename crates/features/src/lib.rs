//! Zerophase Features
//!
//! Causal feature extractors over the target value stream and the
//! [`FeatureBank`] that combines them into one K-channel vector per step.

mod bank;
mod fir;

pub use bank::FeatureBank;
pub use fir::{FirExtractor, one_sided_low_pass};

// Re-export the port for convenience
pub use zerophase_ports::{ExtractorSpec, FeatureExtractor};

/// Factory function to create an extractor from its descriptor
pub fn create_extractor(
    spec: ExtractorSpec,
) -> zerophase_ports::ConfigResult<Box<dyn FeatureExtractor>> {
    Ok(Box::new(FirExtractor::new(spec)?))
}
