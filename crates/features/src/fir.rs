use std::collections::VecDeque;
use std::f64::consts::PI;

use zerophase_ports::{ConfigResult, ExtractorSpec, FeatureExtractor};

/// One-sided truncated ideal low-pass kernel with unit DC gain
///
/// `h[0] = cutoff / pi`, `h[k] = sin(cutoff * k) / (pi * k)`, scaled so the
/// taps sum to one.
pub fn one_sided_low_pass(cutoff: f64, taps: usize) -> Vec<f64> {
    let mut kernel: Vec<f64> = (0..taps)
        .map(|k| {
            if k == 0 {
                cutoff / PI
            } else {
                (cutoff * k as f64).sin() / (PI * k as f64)
            }
        })
        .collect();

    let sum: f64 = kernel.iter().sum();
    if sum.abs() > f64::EPSILON {
        for h in &mut kernel {
            *h /= sum;
        }
    }
    kernel
}

/// Causal FIR filter over the target value stream
///
/// Low-pass when the descriptor has no band-pass cutoff, otherwise the difference
/// of the low-pass kernels at the two band edges.
#[derive(Debug, Clone)]
pub struct FirExtractor {
    spec: ExtractorSpec,
    kernel: Vec<f64>,
    /// Most recent value at the front
    history: VecDeque<f64>,
    seen: usize,
}

impl FirExtractor {
    pub fn new(spec: ExtractorSpec) -> ConfigResult<Self> {
        spec.validate()?;

        let mut kernel = one_sided_low_pass(spec.low_pass_cutoff, spec.filter_length);
        if let Some(lower) = spec.band_pass_cutoff {
            let lower = one_sided_low_pass(lower, spec.filter_length);
            for (h, l) in kernel.iter_mut().zip(lower) {
                *h -= l;
            }
        }

        Ok(Self {
            history: VecDeque::with_capacity(spec.filter_length),
            kernel,
            spec,
            seen: 0,
        })
    }

    pub fn kernel(&self) -> &[f64] {
        &self.kernel
    }

    pub fn is_settled(&self) -> bool {
        self.seen >= self.spec.settling_length
    }
}

impl FeatureExtractor for FirExtractor {
    fn spec(&self) -> &ExtractorSpec {
        &self.spec
    }

    fn update(&mut self, value: f64) -> Option<f64> {
        if self.history.len() == self.kernel.len() {
            self.history.pop_back();
        }
        self.history.push_front(value);
        self.seen += 1;

        if !self.is_settled() {
            return None;
        }
        Some(
            self.kernel
                .iter()
                .zip(self.history.iter())
                .map(|(h, x)| h * x)
                .sum(),
        )
    }

    fn reset(&mut self) {
        self.history.clear();
        self.seen = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_kernel_unit_gain() {
        let kernel = one_sided_low_pass(PI / 6.0, 12);
        assert_eq!(kernel.len(), 12);
        assert_abs_diff_eq!(kernel.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_none_until_settled() {
        let spec = ExtractorSpec::new("lp", 3, PI / 4.0).with_settling_length(5);
        let mut fir = FirExtractor::new(spec).unwrap();

        for _ in 0..4 {
            assert!(fir.update(1.0).is_none());
        }
        assert!(fir.update(1.0).is_some());
        assert!(fir.is_settled());
    }

    #[test]
    fn test_low_pass_passes_constant() {
        let mut fir = FirExtractor::new(ExtractorSpec::new("lp", 8, PI / 5.0)).unwrap();
        let mut last = None;
        for _ in 0..20 {
            last = fir.update(3.0);
        }
        assert_abs_diff_eq!(last.unwrap(), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_band_pass_blocks_constant() {
        let spec = ExtractorSpec::new("bp", 8, PI / 5.0).with_band_pass(PI / 10.0);
        let mut fir = FirExtractor::new(spec).unwrap();
        let mut last = None;
        for _ in 0..20 {
            last = fir.update(3.0);
        }
        assert_abs_diff_eq!(last.unwrap(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_reset_restarts_settling() {
        let mut fir = FirExtractor::new(ExtractorSpec::new("lp", 2, PI / 2.0)).unwrap();
        fir.update(1.0);
        assert!(fir.update(1.0).is_some());
        fir.reset();
        assert!(fir.update(1.0).is_none());
    }

    #[test]
    fn test_causal_output() {
        let mut fir = FirExtractor::new(ExtractorSpec::new("lp", 2, PI / 2.0)).unwrap();
        let h = fir.kernel().to_vec();
        fir.update(2.0);
        let y = fir.update(4.0).unwrap();
        assert_abs_diff_eq!(y, h[0] * 4.0 + h[1] * 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_spec_rejected() {
        assert!(FirExtractor::new(ExtractorSpec::new("lp", 0, 0.5)).is_err());
        assert!(FirExtractor::new(ExtractorSpec::new("lp", 4, 4.0)).is_err());
    }
}
