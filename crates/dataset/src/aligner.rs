//! Series alignment
//!
//! Replays a feed through the target transform and the feature bank, labels
//! the transformed target, then trims the prefixes that carry no features or
//! no labels so every remaining index is valid in all three series.

use zerophase_core::{FeatureSeries, Series, TargetSeries, TargetTransform};
use zerophase_features::FeatureBank;
use zerophase_filter::{LabelStrategy, SymmetricLabeler};
use zerophase_ports::{ConfigError, ObservationFeed};

use crate::error::{DatasetError, Result};

/// Feature, target and label series sharing one timestamp axis
///
/// Index `i` of each series refers to the same observation. Every feature
/// entry is present; labels are present except for the trailing
/// boundary the symmetric filter cannot reach.
#[derive(Debug, Clone)]
pub struct AlignedSeries<L> {
    features: FeatureSeries,
    target: TargetSeries,
    labels: Series<L>,
    num_channels: usize,
    warmup_length: usize,
    half_length: usize,
    max_filter_length: usize,
}

impl<L> AlignedSeries<L> {
    pub fn features(&self) -> &FeatureSeries {
        &self.features
    }

    pub fn target(&self) -> &TargetSeries {
        &self.target
    }

    pub fn labels(&self) -> &Series<L> {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// K, the number of feature channels
    pub fn num_channels(&self) -> usize {
        self.num_channels
    }

    /// Observations trimmed while the extractors settled
    pub fn warmup_length(&self) -> usize {
        self.warmup_length
    }

    /// Half-length L of the labeling filter, also the boundary trim
    pub fn half_length(&self) -> usize {
        self.half_length
    }

    /// Longest extractor filter length
    pub fn max_filter_length(&self) -> usize {
        self.max_filter_length
    }

    /// Check that all three series have equal length and equal timestamps
    pub fn verify(&self) -> Result<()> {
        if self.features.len() != self.labels.len() || self.target.len() != self.labels.len() {
            return Err(DatasetError::LengthMismatch {
                features: self.features.len(),
                labels: self.labels.len(),
            });
        }

        let label_timestamps = self.labels.timestamps();
        let feature_timestamps = self.features.timestamps();
        let target_timestamps = self.target.timestamps().iter().copied();

        for (index, ((expected, feature_ts), target_ts)) in label_timestamps
            .zip(feature_timestamps)
            .zip(target_timestamps)
            .enumerate()
        {
            if feature_ts != expected {
                return Err(DatasetError::Misaligned {
                    index,
                    expected,
                    found: feature_ts,
                });
            }
            if target_ts != expected {
                return Err(DatasetError::Misaligned {
                    index,
                    expected,
                    found: target_ts,
                });
            }
        }
        Ok(())
    }
}

/// Builds [`AlignedSeries`] from an observation feed
#[derive(Debug)]
pub struct SeriesAligner {
    bank: FeatureBank,
    transform: TargetTransform,
}

impl SeriesAligner {
    pub fn new(bank: FeatureBank, transform: TargetTransform) -> Self {
        Self { bank, transform }
    }

    pub fn bank(&self) -> &FeatureBank {
        &self.bank
    }

    pub fn transform(&self) -> &TargetTransform {
        &self.transform
    }

    /// Replay `feed` and return its target and feature series, untrimmed
    ///
    /// Feature entries are absent until every extractor has settled.
    pub fn replay(&mut self, feed: &mut dyn ObservationFeed) -> Result<(TargetSeries, FeatureSeries)> {
        if self.bank.is_empty() {
            return Err(ConfigError::NoExtractors.into());
        }
        if !self.transform.is_valid() {
            return Err(ConfigError::InvalidDifferencingOrder(self.transform.order).into());
        }

        self.bank.reset();
        let mut target = TargetSeries::new(self.transform);
        let mut features = FeatureSeries::new();

        while let Some(observation) = feed.next_observation() {
            let observation = observation?;
            if self.transform.log && observation.value <= 0.0 {
                return Err(DatasetError::NonPositivePrice {
                    index: target.len(),
                    value: observation.value,
                });
            }

            let value = target.push(observation.timestamp, observation.value);
            match self.bank.update(value) {
                Some(vector) => features.push_present(observation.timestamp, vector),
                None => features.push_absent(observation.timestamp),
            }
        }

        log::debug!(
            "Replayed {} observations from {} ({} present feature rows)",
            target.len(),
            feed.name(),
            features.count_present()
        );
        Ok((target, features))
    }

    /// Replay, label and trim `feed` into an aligned triple
    pub fn align<S: LabelStrategy>(
        &mut self,
        feed: &mut dyn ObservationFeed,
        labeler: &SymmetricLabeler<S>,
    ) -> Result<AlignedSeries<S::Label>> {
        let (mut target, mut features) = self.replay(feed)?;
        let observed = target.len();
        let warmup_length = self.bank.max_settling_length();
        let half_length = labeler.half_length();

        if observed < warmup_length {
            return Err(DatasetError::InsufficientData {
                stage: "feature warm-up",
                required: warmup_length,
                available: observed,
            });
        }
        if observed < warmup_length + half_length {
            return Err(DatasetError::InsufficientData {
                stage: "label boundary",
                required: warmup_length + half_length,
                available: observed,
            });
        }

        features.drop_front(warmup_length);
        target.drop_front(warmup_length);

        let mut labels = labeler.label(&target);

        features.drop_front(half_length);
        target.drop_front(half_length);
        labels.drop_front(half_length);

        let aligned = AlignedSeries {
            features,
            target,
            labels,
            num_channels: self.bank.num_channels(),
            warmup_length,
            half_length,
            max_filter_length: self.bank.max_filter_length(),
        };
        aligned.verify()?;

        log::info!(
            "Aligned {} of {} observations (warm-up {}, boundary {}, {} labeled)",
            aligned.len(),
            observed,
            warmup_length,
            half_length,
            aligned.labels.count_present()
        );
        Ok(aligned)
    }
}
