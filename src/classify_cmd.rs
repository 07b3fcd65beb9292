//! Classify command: label one feature vector.

use anyhow::{Context, Result, bail};
use tracing::{info, info_span};

use crate::cli::ClassifyArgs;
use crate::session::Session;

/// Classify the query and print the label, its neighbors and hints.
pub fn run(args: ClassifyArgs) -> Result<()> {
    let _cmd = info_span!("classify").entered();
    let mut session = Session::open(&args.session, false)?;
    if session.knn.is_empty() {
        bail!(
            "training set {} is empty",
            session.training.display()
        );
    }

    let k = args.k.unwrap_or(session.config.classifier.k);
    let n_hints = args.hints.unwrap_or(session.config.classifier.hints);

    let label = session
        .knn
        .classify(&args.features, k)
        .context("classification failed")?;
    info!(label = %label, k, "query classified");

    println!("{label}");
    for n in session.knn.neighbors() {
        println!("  {:>12.6}  {}", n.distance(), n.sample());
    }
    let hints = session.knn.hints(n_hints)?;
    if !hints.is_empty() {
        println!("hints: {}", hints.join(", "));
    }
    Ok(())
}
