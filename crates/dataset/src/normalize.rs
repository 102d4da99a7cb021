use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::minibatch::Minibatch;
use crate::source::{BatchPreProcessor, MinibatchSource};

/// Standard deviations below this are treated as one
const MIN_STD: f64 = 1e-12;

/// Per-channel feature standardization, `(x - mean) / std`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standardizer {
    means: Vec<f64>,
    stds: Vec<f64>,
}

impl Standardizer {
    pub fn new(means: Vec<f64>, stds: Vec<f64>) -> Self {
        Self { means, stds }
    }

    /// Walk `source` once and collect statistics over every emitted feature value
    ///
    /// The source is reset before and after the pass. An installed
    /// pre-processor is bypassed during the pass and reinstalled afterwards,
    /// also when the pass fails.
    pub fn fit(source: &mut dyn MinibatchSource) -> Result<Self> {
        let previous = source.take_pre_processor();
        source.reset();
        let pass = Self::accumulate(source);
        source.reset();
        if let Some(pre_processor) = previous {
            source.set_pre_processor(pre_processor);
        }
        let (sums, squares, count) = pass?;

        let n = count.max(1) as f64;
        let means: Vec<f64> = sums.iter().map(|s| s / n).collect();
        let stds = squares
            .iter()
            .zip(&means)
            .map(|(sq, mean)| (sq / n - mean * mean).max(0.0).sqrt())
            .collect();

        log::info!("Fitted standardizer over {} steps, means {:?}", count, means);
        Ok(Self { means, stds })
    }

    /// Per-channel sums and sums of squares over the remaining batches
    fn accumulate(source: &mut dyn MinibatchSource) -> Result<(Vec<f64>, Vec<f64>, usize)> {
        let channels = source.num_channels();
        let mut sums = vec![0.0; channels];
        let mut squares = vec![0.0; channels];
        let mut count = 0usize;

        while source.has_next() {
            let batch = source.next()?;
            for example in batch.features.outer_iter() {
                for (channel, values) in example.outer_iter().enumerate() {
                    for value in values.iter() {
                        sums[channel] += value;
                        squares[channel] += value * value;
                    }
                }
            }
            count += batch.batch_size() * batch.window_length();
        }
        Ok((sums, squares, count))
    }

    pub fn means(&self) -> &[f64] {
        &self.means
    }

    pub fn stds(&self) -> &[f64] {
        &self.stds
    }
}

impl BatchPreProcessor for Standardizer {
    fn pre_process(&self, batch: &mut Minibatch) {
        for mut example in batch.features.outer_iter_mut() {
            for (channel, mut values) in example.outer_iter_mut().enumerate() {
                let (Some(mean), Some(std)) = (self.means.get(channel), self.stds.get(channel)) else {
                    continue;
                };
                let scale = if *std < MIN_STD { 1.0 } else { *std };
                values.mapv_inplace(|v| (v - mean) / scale);
            }
        }
    }

    fn name(&self) -> &str {
        "Standardizer"
    }
}
