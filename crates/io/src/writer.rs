//! Writing a classifier's committed set to a training file.

use std::fmt::Write as _;
use std::io::Write as _;
use std::path::Path;

use glyph_knn::Classifier;
use tracing::info;

use crate::error::IoError;

/// Writes every committed sample of `knn` to `path`, one line each, in
/// store order. The file is truncated first and parent directories are
/// created as needed.
///
/// # Errors
///
/// - [`IoError::InvalidLabel`] if a label cannot be written; the file is
///   not touched.
/// - [`IoError::Io`] on any filesystem failure.
pub fn save(path: &Path, knn: &Classifier) -> Result<(), IoError> {
    let samples = knn.samples();
    let mut out = String::new();
    for s in &samples {
        out.push_str(&format_line(s.label(), s.features())?);
        out.push('\n');
    }

    let io_err = |source| IoError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    let mut file = std::fs::File::create(path).map_err(io_err)?;
    file.write_all(out.as_bytes()).map_err(io_err)?;
    file.flush().map_err(io_err)?;

    info!(path = %path.display(), n_samples = samples.len(), "saved training set");
    Ok(())
}

/// Formats one sample as `label:f1,...,fn`.
///
/// Features use the shortest representation that parses back to the same
/// `f64`.
///
/// # Errors
///
/// Returns [`IoError::InvalidLabel`] for a label containing `:` or a line
/// break.
pub fn format_line(label: &str, features: &[f64]) -> Result<String, IoError> {
    if label.contains([':', '\n', '\r']) {
        return Err(IoError::InvalidLabel {
            label: label.to_string(),
        });
    }
    let mut line = String::with_capacity(label.len() + features.len() * 8);
    line.push_str(label);
    line.push(':');
    for (i, v) in features.iter().enumerate() {
        if i > 0 {
            line.push(',');
        }
        // infallible for String
        let _ = write!(line, "{v}");
    }
    Ok(line)
}
