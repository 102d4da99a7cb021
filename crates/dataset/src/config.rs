//! Dataset configuration
//!
//! Everything fixed at construction time: window geometry, the target
//! transform, the labeling filter and the extractor descriptors.

use serde::{Deserialize, Serialize};
use zerophase_core::{SeriesFormat, TargetTransform};
use zerophase_ports::{ConfigError, ConfigResult, ExtractorSpec};

/// Window geometry of the batch iterators
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IteratorConfig {
    /// Default minibatch size B
    pub batch_size: usize,
    /// Window length T (timesteps per example)
    pub window_length: usize,
    /// Declared number of examples, advisory only
    pub total_examples: usize,
}

impl IteratorConfig {
    pub fn new(batch_size: usize, window_length: usize) -> Self {
        Self {
            batch_size,
            window_length,
            total_examples: 0,
        }
    }

    pub fn with_total_examples(mut self, total_examples: usize) -> Self {
        self.total_examples = total_examples;
        self
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.batch_size == 0 {
            return Err(ConfigError::ZeroBatchSize);
        }
        if self.window_length == 0 {
            return Err(ConfigError::ZeroWindowLength);
        }
        Ok(())
    }
}

impl Default for IteratorConfig {
    fn default() -> Self {
        Self {
            batch_size: 32,
            window_length: 60,
            total_examples: 0,
        }
    }
}

/// Overrides for the labeling filter
///
/// Unset fields fall back to the primary (first) extractor: its low-pass
/// cutoff and its filter length as the half-length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelingConfig {
    #[serde(default)]
    pub cutoff: Option<f64>,
    #[serde(default)]
    pub half_length: Option<usize>,
}

impl LabelingConfig {
    pub fn with_cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = Some(cutoff);
        self
    }

    pub fn with_half_length(mut self, half_length: usize) -> Self {
        self.half_length = Some(half_length);
        self
    }

    /// Resolve `(cutoff, half_length)` against the primary extractor
    pub fn resolve(&self, primary: Option<&ExtractorSpec>) -> ConfigResult<(f64, usize)> {
        let cutoff = match (self.cutoff, primary) {
            (Some(cutoff), _) => cutoff,
            (None, Some(spec)) => spec.low_pass_cutoff,
            (None, None) => return Err(ConfigError::NoExtractors),
        };
        let half_length = match (self.half_length, primary) {
            (Some(half_length), _) => half_length,
            (None, Some(spec)) => spec.filter_length,
            (None, None) => return Err(ConfigError::NoExtractors),
        };
        Ok((cutoff, half_length))
    }
}

/// Full construction-time configuration of a dataset iterator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetConfig {
    #[serde(default)]
    pub iterator: IteratorConfig,
    #[serde(default)]
    pub labeling: LabelingConfig,
    #[serde(default)]
    pub transform: TargetTransform,
    #[serde(default)]
    pub format: SeriesFormat,
    pub extractors: Vec<ExtractorSpec>,
}

impl DatasetConfig {
    pub fn new(extractors: Vec<ExtractorSpec>, iterator: IteratorConfig) -> Self {
        Self {
            iterator,
            extractors,
            ..Self::default()
        }
    }

    pub fn with_transform(mut self, transform: TargetTransform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_labeling(mut self, labeling: LabelingConfig) -> Self {
        self.labeling = labeling;
        self
    }

    pub fn with_format(mut self, format: SeriesFormat) -> Self {
        self.format = format;
        self
    }

    /// Parse from JSON
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        self.iterator.validate()?;
        if !self.transform.is_valid() {
            return Err(ConfigError::InvalidDifferencingOrder(self.transform.order));
        }
        if self.extractors.is_empty() {
            return Err(ConfigError::NoExtractors);
        }
        for spec in &self.extractors {
            spec.validate()?;
        }
        Ok(())
    }
}
