//! Feature Extractor Port - Abstraction for multichannel feature extraction
//!
//! Extractors are stateful, causal filters over the target value stream.
//! Each one emits a single feature channel per observation once it has
//! settled.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::f64::consts::PI;

use crate::error::{ConfigError, ConfigResult};

/// Descriptor for one feature extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractorSpec {
    /// Extractor identifier for logging
    pub name: String,
    /// Observations consumed before the output is valid
    pub settling_length: usize,
    /// Number of filter taps
    pub filter_length: usize,
    /// Low-pass cutoff frequency in radians per step, in (0, pi)
    pub low_pass_cutoff: f64,
    /// Lower band edge; when set the extractor is a band-pass
    #[serde(default)]
    pub band_pass_cutoff: Option<f64>,
    /// Extractor-specific parameters
    #[serde(default)]
    pub params: HashMap<String, serde_json::Value>,
}

impl ExtractorSpec {
    pub fn new(name: impl Into<String>, filter_length: usize, low_pass_cutoff: f64) -> Self {
        Self {
            name: name.into(),
            settling_length: filter_length,
            filter_length,
            low_pass_cutoff,
            band_pass_cutoff: None,
            params: HashMap::new(),
        }
    }

    pub fn with_settling_length(mut self, settling_length: usize) -> Self {
        self.settling_length = settling_length;
        self
    }

    pub fn with_band_pass(mut self, cutoff: f64) -> Self {
        self.band_pass_cutoff = Some(cutoff);
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.params.insert(key.into(), value);
        self
    }

    pub fn get_param<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.params
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    pub fn validate(&self) -> ConfigResult<()> {
        let invalid = |reason: &str| ConfigError::InvalidExtractor {
            name: self.name.clone(),
            reason: reason.to_string(),
        };

        if self.filter_length == 0 {
            return Err(invalid("filter length must be positive"));
        }
        if self.settling_length < self.filter_length {
            return Err(invalid("settling length is shorter than the filter length"));
        }
        if !(self.low_pass_cutoff > 0.0 && self.low_pass_cutoff < PI) {
            return Err(ConfigError::InvalidCutoff(self.low_pass_cutoff));
        }
        if let Some(lower) = self.band_pass_cutoff {
            if !(lower > 0.0 && lower < self.low_pass_cutoff) {
                return Err(invalid("band-pass cutoff must lie in (0, low-pass cutoff)"));
            }
        }
        Ok(())
    }
}

/// Port for stateful feature extractors
pub trait FeatureExtractor: Send {
    /// Descriptor this extractor was built from
    fn spec(&self) -> &ExtractorSpec;

    /// Consume the next target value; `None` until the extractor has settled
    fn update(&mut self, value: f64) -> Option<f64>;

    /// Reset internal state
    fn reset(&mut self);

    /// Get extractor name for identification
    fn name(&self) -> &str {
        &self.spec().name
    }
}
