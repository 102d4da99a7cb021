use ndarray::{Array2, Array3};

/// One training minibatch
///
/// Tensors are laid out `[example, channel, time]`; masks are
/// `[example, time]` with `1.0` marking positions that count.
#[derive(Debug, Clone, PartialEq)]
pub struct Minibatch {
    pub features: Array3<f64>,
    pub labels: Array3<f64>,
    pub feature_mask: Option<Array2<f64>>,
    pub label_mask: Option<Array2<f64>>,
}

impl Minibatch {
    pub fn batch_size(&self) -> usize {
        self.features.dim().0
    }

    /// Number of input channels
    pub fn num_channels(&self) -> usize {
        self.features.dim().1
    }

    /// Number of label channels
    pub fn num_outcomes(&self) -> usize {
        self.labels.dim().1
    }

    pub fn window_length(&self) -> usize {
        self.features.dim().2
    }

    pub fn has_masks(&self) -> bool {
        self.feature_mask.is_some() || self.label_mask.is_some()
    }
}
