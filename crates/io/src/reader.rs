//! Loading training files into a classifier.

use std::path::Path;

use glyph_knn::Classifier;
use tracing::{debug, info};

use crate::error::IoError;

/// Adds every sample in the file at `path` to `knn`'s committed set.
///
/// Existing samples are kept. Blank lines are skipped. The whole file is
/// parsed before anything is added, so a malformed line leaves `knn`
/// untouched. Returns the number of samples added.
///
/// # Errors
///
/// - [`IoError::FileNotFound`] if `path` does not exist.
/// - [`IoError::Io`] if the file cannot be read.
/// - [`IoError::Format`] for the first malformed line.
/// - [`IoError::Knn`] if the samples do not match the classifier's
///   dimensionality (or each other's).
pub fn load(path: &Path, knn: &Classifier) -> Result<usize, IoError> {
    let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => IoError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => IoError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let mut items = Vec::new();
    for (i, raw) in text.lines().enumerate() {
        if raw.trim().is_empty() {
            continue;
        }
        items.push(parse_line(raw, i + 1)?);
    }
    debug!(path = %path.display(), n_lines = items.len(), "parsed training file");

    let n = items.len();
    knn.add_training_items(items)?;
    info!(path = %path.display(), n_samples = n, total = knn.len(), "loaded training set");
    Ok(n)
}

/// Parses one `label:f1,...,fn` line.
///
/// A trailing `\r` is stripped and the line is split at the first `:`.
/// Everything before it is the label, kept verbatim (it may be empty or
/// padded with spaces). Every comma-separated feature must be a finite
/// number; whitespace around a feature is ignored. `line_no` is only used
/// for error reporting.
///
/// # Errors
///
/// Returns [`IoError::Format`] describing the first problem found.
pub fn parse_line(line: &str, line_no: usize) -> Result<(String, Vec<f64>), IoError> {
    let format_err = |reason: String| IoError::Format {
        line: line_no,
        reason,
    };

    let line = line.strip_suffix('\r').unwrap_or(line);
    let (label, rest) = line
        .split_once(':')
        .ok_or_else(|| format_err("missing ':' separator".to_string()))?;
    if rest.trim().is_empty() {
        return Err(format_err("no features".to_string()));
    }

    let mut features = Vec::new();
    for token in rest.split(',') {
        let token = token.trim();
        let v: f64 = token
            .parse()
            .map_err(|_| format_err(format!("invalid feature '{token}'")))?;
        if !v.is_finite() {
            return Err(format_err(format!("non-finite feature '{token}'")));
        }
        features.push(v);
    }
    Ok((label.to_string(), features))
}
