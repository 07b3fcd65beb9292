//! Output types of a classification pass.

use crate::sample::Sample;

/// One of the k nearest neighbors of the last query.
#[derive(Debug, Clone)]
pub struct Neighbor {
    /// Snapshot of the committed sample, taken after reliability updates.
    sample: Sample,
    /// Standardized distance to the query.
    distance: f64,
}

impl Neighbor {
    pub(crate) fn new(sample: Sample, distance: f64) -> Self {
        Self { sample, distance }
    }

    /// Returns the neighbor sample.
    pub fn sample(&self) -> &Sample {
        &self.sample
    }

    /// Returns the standardized distance to the query.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub(crate) fn sample_mut(&mut self) -> &mut Sample {
        &mut self.sample
    }
}

/// A `(distance, label)` entry of the full ranking used for hints.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranked {
    /// Standardized distance to the query.
    pub distance: f64,
    /// Label of the ranked sample.
    pub label: String,
}
