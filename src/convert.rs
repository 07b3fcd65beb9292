//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Result, bail};

use glyph_knn::{ClassifierConfig, ZeroVariance};

use crate::config::ClassifierToml;

/// Parses a zero-variance policy name into the corresponding enum variant.
pub fn parse_zero_variance(s: &str) -> Result<ZeroVariance> {
    match s.to_lowercase().as_str() {
        "infinite" => Ok(ZeroVariance::Infinite),
        "exclude" => Ok(ZeroVariance::Exclude),
        other => bail!("unknown zero-variance policy: {other:?}"),
    }
}

/// Builds a [`ClassifierConfig`] from the TOML classifier configuration.
///
/// Also checks `k`, which is passed per call rather than stored in the
/// engine config.
pub fn build_classifier_config(classifier: &ClassifierToml) -> Result<ClassifierConfig> {
    if classifier.k < 1 {
        bail!("[classifier] k must be >= 1, got {}", classifier.k);
    }
    let zero_variance = parse_zero_variance(&classifier.zero_variance)?;
    let cfg = ClassifierConfig::new()
        .with_capacity(classifier.capacity)
        .with_zero_variance(zero_variance);
    cfg.validate()?;
    Ok(cfg)
}
