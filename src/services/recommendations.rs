use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::{
    db::write_listings,
    error::AppResult,
    models::{Listing, PreferenceBook},
    services::filter,
};

/// Produces per-user recommendations from a fixed preference book
///
/// Recommendation is attribute-range filtering: the user's stored preference
/// is turned into filter criteria and applied to the listing set.
#[derive(Debug, Clone)]
pub struct Recommender {
    preferences: PreferenceBook,
}

impl Recommender {
    pub fn new(preferences: PreferenceBook) -> Self {
        Self { preferences }
    }

    pub fn preferences(&self) -> &PreferenceBook {
        &self.preferences
    }

    /// Returns the listings matching the user's preferences, in input order
    ///
    /// An unknown user yields an empty result and a warning rather than an error.
    pub fn recommend(&self, user_id: u64, listings: &[Listing]) -> Vec<Listing> {
        match self.preferences.lookup(user_id) {
            Ok(preference) => {
                let recommended = filter::apply(listings, &preference.criteria());
                tracing::info!(
                    user_id,
                    matches = recommended.len(),
                    "Generated recommendations"
                );
                recommended
            }
            Err(e) => {
                tracing::warn!(user_id, error = %e, "No preference profile, skipping");
                Vec::new()
            }
        }
    }
}

/// Outcome of a batch run for one user
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecommendation {
    pub user_id: u64,
    pub matches: usize,
    /// Sink the matches were written to; `None` when nothing matched
    pub output: Option<PathBuf>,
}

/// Name of the sink file for a user
pub fn output_path(out_dir: &Path, user_id: u64) -> PathBuf {
    out_dir.join(format!("recommendations_user_{}.csv", user_id))
}

/// Runs recommendations for each user and writes non-empty results
///
/// One CSV file per user id is written to `out_dir`, which is created if
/// missing. Users with no matches, including unknown users, get no file.
pub fn run_batch(
    recommender: &Recommender,
    listings: &[Listing],
    user_ids: &[u64],
    out_dir: &Path,
) -> AppResult<Vec<UserRecommendation>> {
    let mut summary = Vec::with_capacity(user_ids.len());

    for &user_id in user_ids {
        let recommended = recommender.recommend(user_id, listings);

        let output = if recommended.is_empty() {
            tracing::info!(user_id, "No properties found matching criteria");
            None
        } else {
            std::fs::create_dir_all(out_dir)?;
            let path = output_path(out_dir, user_id);
            let file = File::create(&path)?;
            write_listings(BufWriter::new(file), &recommended)?;
            tracing::info!(user_id, path = %path.display(), "Wrote recommendations");
            Some(path)
        };

        summary.push(UserRecommendation {
            user_id,
            matches: recommended.len(),
            output,
        });
    }

    Ok(summary)
}
