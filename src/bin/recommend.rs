use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

use property_search::{
    services::{run_batch, Recommender},
    telemetry, ListingStore, PreferenceBook,
};

/// Writes per-user property recommendations to CSV files
#[derive(Debug, Parser)]
#[command(name = "recommend")]
#[command(about = "Recommend properties from stored user preferences")]
struct Cli {
    /// Listing CSV; the embedded reference dataset when omitted
    #[arg(long)]
    data: Option<PathBuf>,

    /// Directory receiving recommendations_user_<id>.csv files
    #[arg(long, default_value = "data")]
    out: PathBuf,

    /// JSON preference book replacing the built-in profiles
    #[arg(long)]
    preferences: Option<PathBuf>,

    /// User to recommend for; repeatable
    #[arg(long = "user", default_values_t = [101u64])]
    users: Vec<u64>,

    /// Recommend for every user in the preference book
    #[arg(long, conflicts_with = "users")]
    all: bool,

    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    telemetry::init_tracing(cli.verbose);

    let store = match &cli.data {
        Some(path) => ListingStore::from_path(path)
            .with_context(|| format!("loading listings from {}", path.display()))?,
        None => ListingStore::reference()?,
    };

    let preferences = match &cli.preferences {
        Some(path) => PreferenceBook::from_path(path)
            .with_context(|| format!("loading preferences from {}", path.display()))?,
        None => PreferenceBook::builtin(),
    };

    let users = if cli.all {
        preferences.user_ids()
    } else {
        cli.users.clone()
    };

    let recommender = Recommender::new(preferences);
    let summary = run_batch(&recommender, store.listings(), &users, &cli.out)?;

    let written = summary.iter().filter(|r| r.output.is_some()).count();
    tracing::info!(users = summary.len(), written, "Recommendation batch finished");

    Ok(())
}
