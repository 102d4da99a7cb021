use zerophase_core::{Series, TargetSeries};
use zerophase_ports::ConfigResult;

use crate::coefficients::FilterCoefficients;
use crate::strategy::{DirectionLabeling, LabelStrategy, LevelLabeling};

/// Labels a target series with a zero-phase symmetric filter
///
/// For a series of length `N` and half-length `L`, positions
/// `L - 1 ..= N - L - 1` are labeled; the leading `L - 1` and trailing `L`
/// positions are absent. The output always has length `N` and shares the
/// target's timestamps.
#[derive(Debug, Clone)]
pub struct SymmetricLabeler<S: LabelStrategy> {
    coefficients: FilterCoefficients,
    strategy: S,
}

/// One-hot directional labeler
pub type DirectionLabeler = SymmetricLabeler<DirectionLabeling>;

/// Continuous regression-target labeler
pub type LevelLabeler = SymmetricLabeler<LevelLabeling>;

impl<S: LabelStrategy> SymmetricLabeler<S> {
    pub fn new(coefficients: FilterCoefficients, strategy: S) -> Self {
        Self {
            coefficients,
            strategy,
        }
    }

    pub fn coefficients(&self) -> &FilterCoefficients {
        &self.coefficients
    }

    pub fn half_length(&self) -> usize {
        self.coefficients.half_length()
    }

    /// Whether `index` receives a label in a series of length `len`
    pub fn is_interior(&self, index: usize, len: usize) -> bool {
        let half_length = self.half_length();
        index + 1 >= half_length && index + half_length < len
    }

    /// Label every position of `target`
    pub fn label(&self, target: &TargetSeries) -> Series<S::Label> {
        let values = target.values();
        let len = values.len();
        let mut labels = Series::with_capacity(len);

        for (index, &timestamp) in target.timestamps().iter().enumerate() {
            let label = if self.is_interior(index, len) {
                self.strategy.compute(&self.coefficients, values, index)
            } else {
                None
            };
            match label {
                Some(label) => labels.push_present(timestamp, label),
                None => labels.push_absent(timestamp),
            }
        }

        log::debug!(
            "Labeled {} of {} observations ({} strategy, L={}, cutoff={:.4})",
            labels.count_present(),
            len,
            self.strategy.name(),
            self.half_length(),
            self.coefficients.cutoff()
        );
        labels
    }
}

impl DirectionLabeler {
    /// One-hot labeler with a low-pass kernel at `cutoff` of half-length `half_length`
    pub fn classification(cutoff: f64, half_length: usize) -> ConfigResult<Self> {
        Ok(Self::new(
            FilterCoefficients::low_pass(cutoff, half_length)?,
            DirectionLabeling,
        ))
    }
}

impl LevelLabeler {
    /// Regression labeler with a low-pass kernel at `cutoff` of half-length `half_length`
    pub fn regression(cutoff: f64, half_length: usize) -> ConfigResult<Self> {
        Ok(Self::new(
            FilterCoefficients::low_pass(cutoff, half_length)?,
            LevelLabeling,
        ))
    }
}
