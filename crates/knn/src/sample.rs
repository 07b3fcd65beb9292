//! Labelled feature vectors and their reliability bookkeeping.

use std::fmt;

/// Store-unique identity of a committed or staged sample.
///
/// Two samples with the same label and features are still different
/// samples; removal and reliability updates go through this id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SampleId(pub(crate) u64);

impl SampleId {
    /// Returns the raw id value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SampleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One labelled feature vector.
///
/// Samples handed out by the classifier are value snapshots: the label and
/// reliability score can only change through the classifier itself.
#[derive(Debug, Clone)]
pub struct Sample {
    id: SampleId,
    label: String,
    features: Vec<f64>,
    /// Eviction priority; higher means "more often wrong".
    reliability: i64,
    /// Set while a freshly staged sample goes through its first commit.
    protected: bool,
}

impl Sample {
    pub(crate) fn new(id: SampleId, label: impl Into<String>, features: Vec<f64>) -> Self {
        Self {
            id,
            label: label.into(),
            features,
            reliability: 0,
            protected: false,
        }
    }

    /// Returns the sample identity.
    pub fn id(&self) -> SampleId {
        self.id
    }

    /// Returns the label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the feature vector.
    pub fn features(&self) -> &[f64] {
        &self.features
    }

    /// Returns the feature dimensionality.
    pub fn dim(&self) -> usize {
        self.features.len()
    }

    /// Returns the reliability score. Lower means "keep longer".
    pub fn reliability(&self) -> i64 {
        self.reliability
    }

    pub(crate) fn is_protected(&self) -> bool {
        self.protected
    }

    pub(crate) fn set_protected(&mut self, protected: bool) {
        self.protected = protected;
    }

    pub(crate) fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub(crate) fn set_reliability(&mut self, reliability: i64) {
        self.reliability = reliability;
    }

    pub(crate) fn adjust_reliability(&mut self, delta: i64) {
        self.reliability += delta;
    }
}

/// Formats the sample as a persisted line without the trailing newline:
/// `label:f1,f2,...,fn`.
impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.label)?;
        for (i, v) in self.features.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// Returns the distinct labels of `samples` in first-seen order.
pub fn distinct_labels(samples: &[Sample]) -> Vec<String> {
    let mut labels: Vec<String> = Vec::new();
    for s in samples {
        if !labels.iter().any(|l| l == s.label()) {
            labels.push(s.label().to_string());
        }
    }
    labels
}

/// Returns the index of the first non-finite value, if any.
pub(crate) fn first_non_finite(features: &[f64]) -> Option<usize> {
    features.iter().position(|v| !v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(id: u64, label: &str, features: &[f64]) -> Sample {
        Sample::new(SampleId(id), label, features.to_vec())
    }

    #[test]
    fn test_new_sample_is_neutral() {
        let s = sample(1, "a", &[1.0, 2.0]);
        assert_eq!(s.reliability(), 0);
        assert!(!s.is_protected());
        assert_eq!(s.dim(), 2);
        assert_eq!(s.id().get(), 1);
    }

    #[test]
    fn test_display_line_format() {
        let s = sample(1, "x", &[1.0, -2.5, 0.125]);
        assert_eq!(s.to_string(), "x:1,-2.5,0.125");
    }

    #[test]
    fn test_display_empty_label() {
        let s = sample(1, "", &[3.0]);
        assert_eq!(s.to_string(), ":3");
    }

    #[test]
    fn test_adjust_reliability() {
        let mut s = sample(1, "a", &[0.0]);
        s.adjust_reliability(-1);
        s.adjust_reliability(-1);
        s.adjust_reliability(2);
        s.adjust_reliability(1);
        assert_eq!(s.reliability(), 1);
        s.set_reliability(0);
        assert_eq!(s.reliability(), 0);
    }

    #[test]
    fn test_distinct_labels_first_seen_order() {
        let samples = [
            sample(1, "b", &[0.0]),
            sample(2, "a", &[0.0]),
            sample(3, "b", &[0.0]),
            sample(4, "c", &[0.0]),
            sample(5, "a", &[0.0]),
        ];
        assert_eq!(distinct_labels(&samples), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_distinct_labels_empty() {
        assert!(distinct_labels(&[]).is_empty());
    }

    #[test]
    fn test_first_non_finite() {
        assert_eq!(first_non_finite(&[1.0, 2.0]), None);
        assert_eq!(first_non_finite(&[1.0, f64::NAN]), Some(1));
        assert_eq!(first_non_finite(&[f64::NEG_INFINITY]), Some(0));
    }

    #[test]
    fn test_sample_id_display() {
        assert_eq!(SampleId(42).to_string(), "#42");
    }
}
