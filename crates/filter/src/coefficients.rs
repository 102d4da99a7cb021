use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use zerophase_ports::{ConfigError, ConfigResult};

/// One half of a symmetric low-pass kernel
///
/// Holds `c[0..=L]` where `c[0]` is the centre tap. After normalization
/// `c[0] + 2 * (c[1] + .. + c[L]) == 1` (unit DC gain).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoefficients")]
pub struct FilterCoefficients {
    cutoff: f64,
    taps: Vec<f64>,
}

/// Unchecked serialized form
#[derive(Deserialize)]
struct RawCoefficients {
    cutoff: f64,
    taps: Vec<f64>,
}

impl TryFrom<RawCoefficients> for FilterCoefficients {
    type Error = ConfigError;

    fn try_from(raw: RawCoefficients) -> ConfigResult<Self> {
        if !(raw.cutoff > 0.0 && raw.cutoff < PI) {
            return Err(ConfigError::InvalidCutoff(raw.cutoff));
        }
        // Centre tap plus at least one tap per side
        if raw.taps.len() < 2 {
            return Err(ConfigError::ZeroHalfLength);
        }
        if raw.taps.iter().any(|tap| !tap.is_finite()) {
            return Err(ConfigError::InvalidCutoff(raw.cutoff));
        }
        Ok(Self {
            cutoff: raw.cutoff,
            taps: raw.taps,
        })
    }
}

impl FilterCoefficients {
    /// Ideal low-pass at `cutoff` (radians per step) truncated to half-length `half_length`
    ///
    /// `c[0] = cutoff / pi`, `c[i] = sin(cutoff * i) / (pi * i)`, then every tap
    /// is divided by `c[0] + 2 * sum(c[1..=L])`.
    pub fn low_pass(cutoff: f64, half_length: usize) -> ConfigResult<Self> {
        if !(cutoff > 0.0 && cutoff < PI) {
            return Err(ConfigError::InvalidCutoff(cutoff));
        }
        if half_length == 0 {
            return Err(ConfigError::ZeroHalfLength);
        }

        let mut taps = Vec::with_capacity(half_length + 1);
        taps.push(cutoff / PI);
        for i in 1..=half_length {
            let i = i as f64;
            taps.push((cutoff * i).sin() / (PI * i));
        }

        let gain = Self::gain_of(&taps);
        if !gain.is_finite() || gain.abs() < f64::EPSILON {
            return Err(ConfigError::InvalidCutoff(cutoff));
        }
        for tap in &mut taps {
            *tap /= gain;
        }

        Ok(Self { cutoff, taps })
    }

    fn gain_of(taps: &[f64]) -> f64 {
        taps[0] + 2.0 * taps[1..].iter().sum::<f64>()
    }

    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    /// L, the number of taps on each side of the centre
    pub fn half_length(&self) -> usize {
        self.taps.len() - 1
    }

    pub fn taps(&self) -> &[f64] {
        &self.taps
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.taps.get(index).copied()
    }

    /// `c[0] + 2 * sum(c[1..=L])`, 1 up to rounding
    pub fn dc_gain(&self) -> f64 {
        Self::gain_of(&self.taps)
    }

    /// Symmetric convolution centred on `index`
    ///
    /// Uses the centre tap plus `L - 1` taps on each side:
    /// `sum(l = 0..L) c[l] * x[i + l] + sum(l = 1..L) c[l] * x[i - l]`.
    /// The outermost tap `c[L]` only enters through normalization.
    /// Returns `None` when the window would leave `values`.
    pub fn symmetric_response(&self, values: &[f64], index: usize) -> Option<f64> {
        let reach = self.half_length() - 1;
        if index < reach || index + reach >= values.len() {
            return None;
        }

        let mut sum = self.taps[0] * values[index];
        for l in 1..=reach {
            sum += self.taps[l] * (values[index + l] + values[index - l]);
        }
        Some(sum)
    }
}
