//! Configuration for the adaptive classifier.

use crate::error::KnnError;

/// How a feature dimension with zero variance contributes to the distance.
///
/// A dimension is zero-variance when every committed sample carries the same
/// value in it, so the standardized difference is undefined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ZeroVariance {
    /// Contributes `+inf` when the coordinates differ and `0` when equal.
    #[default]
    Infinite,
    /// The dimension is skipped entirely.
    Exclude,
}

/// Configuration for a [`Classifier`](crate::Classifier).
///
/// # Example
///
/// ```
/// use glyph_knn::{ClassifierConfig, ZeroVariance};
///
/// let config = ClassifierConfig::new()
///     .with_capacity(8)
///     .with_zero_variance(ZeroVariance::Exclude);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierConfig {
    /// Maximum number of committed samples kept per label.
    capacity: usize,
    /// Zero-variance dimension policy.
    zero_variance: ZeroVariance,
}

impl ClassifierConfig {
    /// Creates a configuration with `capacity = 5` and `ZeroVariance::Infinite`.
    pub fn new() -> Self {
        Self {
            capacity: 5,
            zero_variance: ZeroVariance::Infinite,
        }
    }

    /// Sets the per-category capacity.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the zero-variance policy.
    pub fn with_zero_variance(mut self, zero_variance: ZeroVariance) -> Self {
        self.zero_variance = zero_variance;
        self
    }

    /// Returns the per-category capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the zero-variance policy.
    pub fn zero_variance(&self) -> ZeroVariance {
        self.zero_variance
    }

    /// Validates this configuration.
    ///
    /// Returns an error if the capacity is zero.
    pub fn validate(&self) -> Result<(), KnnError> {
        if self.capacity < 1 {
            return Err(KnnError::InvalidCapacity {
                capacity: self.capacity,
            });
        }
        Ok(())
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self::new()
    }
}
