//! Opening a classifier from configuration and its persisted training set.

use std::path::PathBuf;

use anyhow::{Context, Result};
use glyph_io::IoError;
use glyph_knn::Classifier;
use tracing::{info, warn};

use crate::cli::SessionArgs;
use crate::config::GlyphConfig;
use crate::convert;

/// A configured classifier together with where its training set lives.
pub struct Session {
    pub config: GlyphConfig,
    pub training: PathBuf,
    pub knn: Classifier,
}

impl Session {
    /// Reads the configuration and loads the training file.
    ///
    /// A missing training file yields an empty classifier when
    /// `allow_missing` is set and an error otherwise.
    pub fn open(args: &SessionArgs, allow_missing: bool) -> Result<Self> {
        let config = match &args.config {
            Some(path) => GlyphConfig::from_file(path)?,
            None => GlyphConfig::default(),
        };
        let training = args
            .training
            .clone()
            .unwrap_or_else(|| config.io.training.clone());

        let knn_cfg = convert::build_classifier_config(&config.classifier)?;
        let knn = Classifier::new(knn_cfg).context("failed to create classifier")?;

        match glyph_io::load(&training, &knn) {
            Ok(n) => info!(path = %training.display(), n_samples = n, "training set loaded"),
            Err(IoError::FileNotFound { .. }) if allow_missing => {
                warn!(path = %training.display(), "training file not found, starting empty");
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("failed to load training set: {}", training.display())
                });
            }
        }

        Ok(Self {
            config,
            training,
            knn,
        })
    }

    /// Writes the committed set back to the training file.
    pub fn save(&self) -> Result<()> {
        glyph_io::save(&self.training, &self.knn).with_context(|| {
            format!("failed to save training set: {}", self.training.display())
        })
    }
}
