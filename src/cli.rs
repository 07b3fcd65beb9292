use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Glyph adaptive nearest-neighbor classifier.
#[derive(Parser)]
#[command(
    name = "glyph",
    version,
    about = "Online adaptive k-nearest-neighbor classifier for stroke features"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Classify one feature vector against the training set.
    Classify(ClassifyArgs),
    /// Add one labelled sample to the training set and save it.
    Train(TrainArgs),
    /// Print per-label counts of the training set.
    Inspect(InspectArgs),
    /// Replay labelled samples through the online learning loop.
    Evaluate(EvaluateArgs),
}

/// Options shared by every subcommand.
#[derive(clap::Args)]
pub struct SessionArgs {
    /// Path to TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the training file path from config.
    #[arg(short, long)]
    pub training: Option<PathBuf>,
}

/// Arguments for the `classify` subcommand.
#[derive(clap::Args)]
pub struct ClassifyArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Comma-separated feature values of the query.
    #[arg(short, long, value_delimiter = ',', required = true, allow_hyphen_values = true)]
    pub features: Vec<f64>,

    /// Override the number of neighbors from config.
    #[arg(short)]
    pub k: Option<usize>,

    /// Override the number of alternative labels to print.
    #[arg(long)]
    pub hints: Option<usize>,
}

/// Arguments for the `train` subcommand.
#[derive(clap::Args)]
pub struct TrainArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Label of the new sample.
    #[arg(short, long)]
    pub label: String,

    /// Comma-separated feature values of the new sample.
    #[arg(short, long, value_delimiter = ',', required = true, allow_hyphen_values = true)]
    pub features: Vec<f64>,
}

/// Arguments for the `inspect` subcommand.
#[derive(clap::Args)]
pub struct InspectArgs {
    #[command(flatten)]
    pub session: SessionArgs,
}

/// Arguments for the `evaluate` subcommand.
#[derive(clap::Args)]
pub struct EvaluateArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Labelled samples to replay, one `label:f1,...,fn` per line.
    #[arg(short, long)]
    pub samples: PathBuf,

    /// Shuffle the samples with this RNG seed before replaying.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Path for the JSON summary. Printed to stdout when omitted.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Do not write the adapted training set back.
    #[arg(long)]
    pub dry_run: bool,
}
