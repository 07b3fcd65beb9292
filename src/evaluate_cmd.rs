//! Evaluate command: replay labelled samples through the online loop.
//!
//! Every sample is classified against the current training set, staged
//! under the predicted label, and corrected to its true label when the
//! prediction was wrong, exactly as an interactive host would do.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result, bail};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::Serialize;
use tracing::{debug, info, info_span};

use glyph_knn::Classifier;

use crate::cli::EvaluateArgs;
use crate::session::Session;

/// Per-label tallies of the replay.
#[derive(Debug, Default, Serialize, PartialEq)]
pub struct LabelSummary {
    pub seen: usize,
    pub classified: usize,
    pub correct: usize,
}

/// JSON summary written at the end of the replay.
#[derive(Debug, Default, Serialize, PartialEq)]
pub struct Summary {
    pub samples: usize,
    pub classified: usize,
    pub correct: usize,
    pub accuracy: Option<f64>,
    pub per_label: BTreeMap<String, LabelSummary>,
    pub final_counts: BTreeMap<String, usize>,
}

/// Run the replay and write the summary.
pub fn run(args: EvaluateArgs) -> Result<()> {
    let _cmd = info_span!("evaluate").entered();
    let mut session = Session::open(&args.session, true)?;

    let mut items = read_samples(&args.samples)?;
    if items.is_empty() {
        bail!("no samples in {}", args.samples.display());
    }
    if let Some(seed) = args.seed {
        items.shuffle(&mut StdRng::seed_from_u64(seed));
        debug!(seed, "samples shuffled");
    }

    let k = session.config.classifier.k;
    info!(n_samples = items.len(), k, "replaying samples");
    let summary = replay(&mut session.knn, items, k)?;
    info!(
        classified = summary.classified,
        correct = summary.correct,
        accuracy = ?summary.accuracy,
        "replay finished"
    );

    if args.dry_run {
        info!("dry run, training set not saved");
    } else {
        session.save()?;
    }

    let json = serde_json::to_string_pretty(&summary).context("failed to serialize summary")?;
    match args.output {
        Some(path) => {
            std::fs::write(&path, &json)
                .with_context(|| format!("failed to write summary: {}", path.display()))?;
            info!(path = %path.display(), "summary written");
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn read_samples(path: &Path) -> Result<Vec<(String, Vec<f64>)>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read samples: {}", path.display()))?;
    let mut items = Vec::new();
    for (i, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let item = glyph_io::parse_line(line, i + 1)
            .with_context(|| format!("malformed sample in {}", path.display()))?;
        items.push(item);
    }
    Ok(items)
}

/// Feeds `items` through classify/stage/correct and tallies the outcome.
///
/// While fewer than `k` samples are available the sample is staged under
/// its true label and committed without classification.
fn replay(knn: &mut Classifier, items: Vec<(String, Vec<f64>)>, k: usize) -> Result<Summary> {
    let mut summary = Summary {
        samples: items.len(),
        ..Summary::default()
    };

    for (label, features) in items {
        let available = knn.len() + usize::from(knn.staged().is_some());
        let tally = summary.per_label.entry(label.clone()).or_default();
        tally.seen += 1;

        if available < k {
            knn.add_to_stage(label.as_str(), features)?;
            knn.commit()?;
            continue;
        }

        let predicted = knn.classify(&features, k)?;
        knn.add_to_stage(predicted.as_str(), features)?;
        tally.classified += 1;
        summary.classified += 1;
        if predicted == label {
            tally.correct += 1;
            summary.correct += 1;
        } else {
            debug!(expected = %label, predicted = %predicted, "wrong detection");
            knn.correct_wrong_detection(&label, &predicted)?;
        }
    }
    knn.commit()?;

    summary.accuracy =
        (summary.classified > 0).then(|| summary.correct as f64 / summary.classified as f64);
    summary.final_counts = knn.label_counts();
    Ok(summary)
}
