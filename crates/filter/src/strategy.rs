use zerophase_core::Direction;

use crate::coefficients::FilterCoefficients;

/// Strategy for turning a symmetric filter response into a label
///
/// Both label flavours share one convolution
/// ([`FilterCoefficients::symmetric_response`]) and differ only in how the
/// response is mapped to a label.
pub trait LabelStrategy: Send + Sync {
    /// Label type produced for a present position
    type Label: Clone + Send;

    /// Label at `index` of `target`, `None` when the filter window leaves the series
    fn compute(
        &self,
        coefficients: &FilterCoefficients,
        target: &[f64],
        index: usize,
    ) -> Option<Self::Label>;

    /// Get the strategy name for logging
    fn name(&self) -> &str;
}

/// Directional (one-hot) labels: `Up` when the smoothed value is strictly positive
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectionLabeling;

impl LabelStrategy for DirectionLabeling {
    type Label = Direction;

    fn compute(
        &self,
        coefficients: &FilterCoefficients,
        target: &[f64],
        index: usize,
    ) -> Option<Direction> {
        coefficients
            .symmetric_response(target, index)
            .map(Direction::from_response)
    }

    fn name(&self) -> &str {
        "direction"
    }
}

/// Continuous labels: the smoothed value itself, unrounded
#[derive(Debug, Clone, Copy, Default)]
pub struct LevelLabeling;

impl LabelStrategy for LevelLabeling {
    type Label = f64;

    fn compute(&self, coefficients: &FilterCoefficients, target: &[f64], index: usize) -> Option<f64> {
        coefficients.symmetric_response(target, index)
    }

    fn name(&self) -> &str {
        "level"
    }
}
