use zerophase_ports::{ConfigError, ConfigResult, ExtractorSpec, FeatureExtractor};

use crate::create_extractor;

/// Ordered collection of extractors producing one K-channel vector per step
///
/// Channel `k` of every emitted vector comes from the `k`-th extractor.
pub struct FeatureBank {
    extractors: Vec<Box<dyn FeatureExtractor>>,
}

impl FeatureBank {
    pub fn new() -> Self {
        Self {
            extractors: Vec::new(),
        }
    }

    /// Build a bank from extractor descriptors, in order
    pub fn from_specs(specs: &[ExtractorSpec]) -> ConfigResult<Self> {
        if specs.is_empty() {
            return Err(ConfigError::NoExtractors);
        }
        let mut bank = Self::new();
        for spec in specs {
            bank.extractors.push(create_extractor(spec.clone())?);
        }
        log::debug!(
            "Built feature bank {:?} (settling {}, longest filter {})",
            bank.channel_names(),
            bank.max_settling_length(),
            bank.max_filter_length()
        );
        Ok(bank)
    }

    /// Add an extractor as the next channel
    pub fn with_extractor(mut self, extractor: Box<dyn FeatureExtractor>) -> Self {
        self.extractors.push(extractor);
        self
    }

    /// Feed one target value to every extractor
    ///
    /// Returns the feature vector once every extractor has settled.
    pub fn update(&mut self, value: f64) -> Option<Vec<f64>> {
        let outputs: Vec<Option<f64>> = self
            .extractors
            .iter_mut()
            .map(|e| e.update(value))
            .collect();
        outputs.into_iter().collect()
    }

    pub fn reset(&mut self) {
        for extractor in &mut self.extractors {
            extractor.reset();
        }
    }

    /// K, the number of feature channels
    pub fn num_channels(&self) -> usize {
        self.extractors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extractors.is_empty()
    }

    /// Descriptor of the first extractor, which drives the labeling filter
    pub fn primary(&self) -> Option<&ExtractorSpec> {
        self.extractors.first().map(|e| e.spec())
    }

    pub fn specs(&self) -> impl Iterator<Item = &ExtractorSpec> {
        self.extractors.iter().map(|e| e.spec())
    }

    /// Longest settling length across extractors
    pub fn max_settling_length(&self) -> usize {
        self.specs().map(|s| s.settling_length).max().unwrap_or(0)
    }

    /// Longest filter length across extractors
    pub fn max_filter_length(&self) -> usize {
        self.specs().map(|s| s.filter_length).max().unwrap_or(0)
    }

    pub fn channel_names(&self) -> Vec<&str> {
        self.extractors.iter().map(|e| e.name()).collect()
    }
}

impl Default for FeatureBank {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FeatureBank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeatureBank")
            .field("channels", &self.channel_names())
            .finish()
    }
}
