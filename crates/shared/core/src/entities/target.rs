use serde::{Deserialize, Serialize};

use crate::values::Timestamp;

/// Weights below this magnitude end the fractional differencing expansion
const WEIGHT_CUTOFF: f64 = 1e-12;

/// Transformation applied to raw prices before labeling and feature extraction
///
/// Optionally takes the natural log, then differences with order `order`.
/// `order = 1.0` is the plain first difference; values in `(0, 1)` give
/// fractional differencing with binomial weights truncated at `max_lags`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetTransform {
    /// Differencing order, in `(0, 1]`
    pub order: f64,
    /// Take the natural log of prices first
    pub log: bool,
    /// Longest lag used by fractional differencing
    pub max_lags: usize,
}

impl TargetTransform {
    pub fn new(order: f64, log: bool) -> Self {
        Self {
            order,
            log,
            ..Self::default()
        }
    }

    pub fn with_max_lags(mut self, max_lags: usize) -> Self {
        self.max_lags = max_lags;
        self
    }

    /// Whether the order lies in `(0, 1]`
    pub fn is_valid(&self) -> bool {
        self.order.is_finite() && self.order > 0.0 && self.order <= 1.0
    }

    /// Binomial differencing weights `w0 = 1, wk = -w(k-1) * (d - k + 1) / k`
    pub fn weights(&self) -> Vec<f64> {
        let mut weights = vec![1.0];
        for k in 1..=self.max_lags {
            let prev = weights[k - 1];
            let w = -prev * (self.order - k as f64 + 1.0) / k as f64;
            if w.abs() < WEIGHT_CUTOFF {
                break;
            }
            weights.push(w);
        }
        weights
    }
}

impl Default for TargetTransform {
    fn default() -> Self {
        Self {
            order: 1.0,
            log: false,
            max_lags: 36,
        }
    }
}

/// Raw price series together with its transformed target values
///
/// Both columns share one timestamp axis. The transformed value is what
/// labels are derived from; the raw value is kept for reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetSeries {
    transform: TargetTransform,
    weights: Vec<f64>,
    timestamps: Vec<Timestamp>,
    raw: Vec<f64>,
    /// Prices after the optional log, the input to differencing
    levels: Vec<f64>,
    values: Vec<f64>,
}

impl TargetSeries {
    pub fn new(transform: TargetTransform) -> Self {
        Self {
            weights: transform.weights(),
            transform,
            timestamps: Vec::new(),
            raw: Vec::new(),
            levels: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Build directly from already transformed values, bypassing differencing
    pub fn from_values(points: impl IntoIterator<Item = (Timestamp, f64)>) -> Self {
        let mut series = Self::new(TargetTransform::default());
        for (timestamp, value) in points {
            series.timestamps.push(timestamp);
            series.raw.push(value);
            series.levels.push(value);
            series.values.push(value);
        }
        series
    }

    /// Append a raw price and return its transformed value
    ///
    /// The first observation has no history; its transformed value is `0.0`.
    pub fn push(&mut self, timestamp: Timestamp, price: f64) -> f64 {
        let level = if self.transform.log { price.ln() } else { price };
        self.timestamps.push(timestamp);
        self.raw.push(price);
        self.levels.push(level);

        let value = if self.levels.len() == 1 {
            0.0
        } else {
            self.weights
                .iter()
                .zip(self.levels.iter().rev())
                .map(|(w, x)| w * x)
                .sum()
        };
        self.values.push(value);
        value
    }

    pub fn transform(&self) -> &TargetTransform {
        &self.transform
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn timestamp(&self, index: usize) -> Option<Timestamp> {
        self.timestamps.get(index).copied()
    }

    /// Transformed target value at `index`
    pub fn value(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Untransformed price at `index`
    pub fn raw_value(&self, index: usize) -> Option<f64> {
        self.raw.get(index).copied()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn raw_values(&self) -> &[f64] {
        &self.raw
    }

    pub fn timestamps(&self) -> &[Timestamp] {
        &self.timestamps
    }

    /// Drop up to `count` leading observations, returning how many were removed
    pub fn drop_front(&mut self, count: usize) -> usize {
        let removed = count.min(self.values.len());
        self.timestamps.drain(..removed);
        self.raw.drain(..removed);
        self.levels.drain(..removed);
        self.values.drain(..removed);
        removed
    }
}
