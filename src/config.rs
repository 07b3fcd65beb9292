use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level Glyph configuration.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct GlyphConfig {
    /// I/O settings.
    #[serde(default)]
    pub io: IoToml,

    /// Classifier settings.
    #[serde(default)]
    pub classifier: ClassifierToml,
}

impl GlyphConfig {
    /// Reads and parses a TOML configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&toml_str).context("failed to parse TOML config")
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoToml {
    #[serde(default = "default_training")]
    pub training: PathBuf,
}

impl Default for IoToml {
    fn default() -> Self {
        Self {
            training: default_training(),
        }
    }
}

fn default_training() -> PathBuf {
    PathBuf::from("training.txt")
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassifierToml {
    #[serde(default = "default_k")]
    pub k: usize,
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    #[serde(default = "default_zero_variance")]
    pub zero_variance: String,
    #[serde(default = "default_hints")]
    pub hints: usize,
}

impl Default for ClassifierToml {
    fn default() -> Self {
        Self {
            k: default_k(),
            capacity: default_capacity(),
            zero_variance: default_zero_variance(),
            hints: default_hints(),
        }
    }
}

fn default_k() -> usize {
    3
}
fn default_capacity() -> usize {
    5
}
fn default_zero_variance() -> String {
    "infinite".to_string()
}
fn default_hints() -> usize {
    3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config: GlyphConfig = toml::from_str("").unwrap();
        assert_eq!(config.io.training, PathBuf::from("training.txt"));
        assert_eq!(config.classifier.k, 3);
        assert_eq!(config.classifier.capacity, 5);
        assert_eq!(config.classifier.zero_variance, "infinite");
        assert_eq!(config.classifier.hints, 3);
    }

    #[test]
    fn sections_override_defaults() {
        let config: GlyphConfig = toml::from_str(
            r#"
            [io]
            training = "data/digits.txt"

            [classifier]
            k = 5
            zero_variance = "exclude"
            "#,
        )
        .unwrap();
        assert_eq!(config.io.training, PathBuf::from("data/digits.txt"));
        assert_eq!(config.classifier.k, 5);
        assert_eq!(config.classifier.capacity, 5);
        assert_eq!(config.classifier.zero_variance, "exclude");
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(toml::from_str::<GlyphConfig>("[classifier]\nkk = 1\n").is_err());
        assert!(toml::from_str::<GlyphConfig>("[extra]\n").is_err());
    }

    #[test]
    fn from_file_reports_missing_path() {
        let err = GlyphConfig::from_file(Path::new("/nonexistent/glyph.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read config file"));
    }
}
