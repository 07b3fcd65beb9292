//! Train command: stage, commit and persist one labelled sample.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use crate::cli::TrainArgs;
use crate::session::Session;

/// Add the sample through the staging slot so capacity is enforced, then save.
pub fn run(args: TrainArgs) -> Result<()> {
    let _cmd = info_span!("train").entered();
    let mut session = Session::open(&args.session, true)?;

    session
        .knn
        .add_to_stage(args.label.as_str(), args.features)
        .context("invalid training sample")?;
    let report = session.knn.commit().context("commit failed")?;
    for s in &report.evicted {
        println!("evicted {s}");
    }
    info!(
        label = %args.label,
        n_evicted = report.evicted.len(),
        total = session.knn.len(),
        "sample committed"
    );

    session.save()?;
    println!(
        "{} now has {} sample(s)",
        session.training.display(),
        session.knn.len()
    );
    Ok(())
}
