//! Per-dimension variance profile and standardized Euclidean distance.

use tracing::warn;

use crate::config::ZeroVariance;
use crate::error::KnnError;
use crate::sample::Sample;

/// Population variance of every feature dimension over a training set.
///
/// Rebuilt from the committed samples before each classification; it is
/// never persisted.
#[derive(Debug, Clone)]
pub struct VarianceProfile {
    std_devs: Vec<f64>,
    variances: Vec<f64>,
    zero_variance: ZeroVariance,
}

impl VarianceProfile {
    /// Computes the population variance `mean((x_i - mean(x_i))^2)` of every
    /// dimension.
    ///
    /// Values are divided by the dimension's largest magnitude before the
    /// two passes, so features anywhere in the finite `f64` range produce a
    /// finite, positive standard deviation. A dimension whose values are all
    /// identical gets exactly `0.0`.
    ///
    /// # Errors
    ///
    /// Returns [`KnnError::EmptyTrainingSet`] for an empty slice and
    /// [`KnnError::DimensionMismatch`] if the samples disagree on length.
    pub fn from_samples(samples: &[Sample], zero_variance: ZeroVariance) -> Result<Self, KnnError> {
        let first = samples.first().ok_or(KnnError::EmptyTrainingSet)?;
        let dim = first.dim();
        if let Some(bad) = samples.iter().find(|s| s.dim() != dim) {
            return Err(KnnError::DimensionMismatch {
                expected: dim,
                got: bad.dim(),
            });
        }

        let n = samples.len() as f64;
        let mut std_devs = Vec::with_capacity(dim);
        for i in 0..dim {
            let head = first.features()[i];
            if samples.iter().all(|s| s.features()[i] == head) {
                std_devs.push(0.0);
                continue;
            }
            let scale = samples
                .iter()
                .map(|s| s.features()[i].abs())
                .fold(0.0, f64::max);
            let mean = samples.iter().map(|s| s.features()[i] / scale).sum::<f64>() / n;
            let var = samples
                .iter()
                .map(|s| {
                    let d = s.features()[i] / scale - mean;
                    d * d
                })
                .sum::<f64>()
                / n;
            std_devs.push(scale * var.sqrt());
        }
        let variances: Vec<f64> = std_devs.iter().map(|sd| sd * sd).collect();

        let n_zero = std_devs.iter().filter(|&&sd| sd == 0.0).count();
        if n_zero > 0 {
            warn!(n_zero, dim, policy = ?zero_variance, "zero-variance feature dimensions");
        }

        Ok(Self {
            std_devs,
            variances,
            zero_variance,
        })
    }

    /// Returns the per-dimension variances. Saturates to `+inf` for
    /// dimensions whose spread exceeds `sqrt(f64::MAX)`; distances use
    /// [`std_devs`](Self::std_devs) and are unaffected.
    pub fn variances(&self) -> &[f64] {
        &self.variances
    }

    /// Returns the per-dimension standard deviations.
    pub fn std_devs(&self) -> &[f64] {
        &self.std_devs
    }

    /// Returns the dimensionality this profile was built for.
    pub fn dim(&self) -> usize {
        self.std_devs.len()
    }

    /// Returns the zero-variance policy in effect.
    pub fn zero_variance(&self) -> ZeroVariance {
        self.zero_variance
    }

    /// Standardized distance `sqrt(Σ (a_i - b_i)^2 / variance_i)`.
    ///
    /// # Errors
    ///
    /// Returns [`KnnError::DimensionMismatch`] if either vector does not match
    /// the profile dimensionality.
    pub fn distance(&self, a: &[f64], b: &[f64]) -> Result<f64, KnnError> {
        for v in [a, b] {
            if v.len() != self.dim() {
                return Err(KnnError::DimensionMismatch {
                    expected: self.dim(),
                    got: v.len(),
                });
            }
        }
        Ok(self.distance_unchecked(a, b))
    }

    /// Same as [`distance`](Self::distance) with lengths already validated.
    pub(crate) fn distance_unchecked(&self, a: &[f64], b: &[f64]) -> f64 {
        debug_assert_eq!(a.len(), self.dim());
        debug_assert_eq!(b.len(), self.dim());

        let mut acc = 0.0;
        for ((&x, &y), &sd) in a.iter().zip(b.iter()).zip(self.std_devs.iter()) {
            let d = x - y;
            if sd > 0.0 {
                let t = d / sd;
                acc += t * t;
            } else if d != 0.0 {
                match self.zero_variance {
                    ZeroVariance::Infinite => return f64::INFINITY,
                    ZeroVariance::Exclude => {}
                }
            }
        }
        acc.sqrt()
    }
}
