//! Error types for glyph-io.

use std::path::PathBuf;

use glyph_knn::KnnError;

/// Error type for all fallible operations in the glyph-io crate.
///
/// Covers missing files, operating-system I/O failures, malformed lines in
/// a training file, labels that cannot be written in the line format, and
/// classifier rejections raised while adding the parsed samples.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when the training file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps an operating-system failure while reading or writing.
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        /// Path being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Returned when a line of a training file cannot be parsed.
    #[error("line {line}: {reason}")]
    Format {
        /// 1-based line number.
        line: usize,
        /// What was wrong with the line.
        reason: String,
    },

    /// Returned when a label cannot be represented in the line format.
    #[error("label {label:?} cannot be saved: contains ':' or a line break")]
    InvalidLabel {
        /// The offending label.
        label: String,
    },

    /// Wraps a rejection from the classifier (e.g. dimensionality mismatch).
    #[error(transparent)]
    Knn(#[from] KnnError),
}
