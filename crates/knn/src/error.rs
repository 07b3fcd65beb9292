//! Error types for the glyph-knn crate.

/// Error type for all fallible operations in the glyph-knn crate.
///
/// The first group of variants are precondition violations: the operation
/// was asked to do something undefined and is refused without touching the
/// classifier. The second group are usage errors a host is expected to
/// recover from.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum KnnError {
    /// Returned when a variance profile or classification needs at least
    /// one committed sample.
    #[error("training set is empty")]
    EmptyTrainingSet,

    /// Returned when k is outside `[1, available]`.
    #[error("k must be in [1, {available}], got {k}")]
    InvalidK {
        /// The invalid k value.
        k: usize,
        /// Number of committed samples at the time of the call.
        available: usize,
    },

    /// Returned when a feature vector does not match the store dimensionality.
    #[error("feature length {got} does not match training dimensionality {expected}")]
    DimensionMismatch {
        /// Dimensionality of the committed samples.
        expected: usize,
        /// Length of the offending feature vector.
        got: usize,
    },

    /// Returned when the majority vote still ties with no candidates left.
    #[error("vote tie cannot be resolved")]
    UnresolvableTie,

    /// Returned when a feature vector contains NaN or infinity.
    #[error("non-finite value in {input}")]
    NonFiniteInput {
        /// Name of the input containing the non-finite value.
        input: &'static str,
    },

    /// Returned when a feature vector has no dimensions.
    #[error("empty feature vector in {input}")]
    EmptyFeatures {
        /// Name of the input with no features.
        input: &'static str,
    },

    /// Returned when a label contains `:` or a line break, which the
    /// persisted line format cannot represent.
    #[error("label {label:?} must not contain ':' or a line break")]
    InvalidLabel {
        /// The rejected label.
        label: String,
    },

    /// Returned when the per-category capacity is zero.
    #[error("per-category capacity must be >= 1, got {capacity}")]
    InvalidCapacity {
        /// The invalid capacity.
        capacity: usize,
    },

    /// Returned when a correction is requested with nothing staged.
    #[error("no sample is staged")]
    NothingStaged,

    /// Returned when an operation needs a previous classification.
    #[error("no classification has been performed yet")]
    NoClassification,

    /// Returned when a snapshot index is out of range.
    #[error("index {index} out of range for snapshot of length {len}")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Length of the snapshot.
        len: usize,
    },
}
