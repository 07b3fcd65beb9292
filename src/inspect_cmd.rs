//! Inspect command: summarize the training set.

use anyhow::Result;
use tracing::info_span;

use crate::cli::InspectArgs;
use crate::session::Session;

/// Print dimensionality and per-label counts.
pub fn run(args: InspectArgs) -> Result<()> {
    let _cmd = info_span!("inspect").entered();
    let session = Session::open(&args.session, false)?;
    let knn = &session.knn;

    println!("file:      {}", session.training.display());
    println!("samples:   {}", knn.len());
    match knn.dim() {
        Some(d) => println!("dimension: {d}"),
        None => println!("dimension: -"),
    }
    println!("capacity:  {} per label", knn.training_size());
    for (label, n) in knn.label_counts() {
        println!("  {label:<16} {n}");
    }
    Ok(())
}
