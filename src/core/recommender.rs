use std::collections::HashSet;
use thiserror::Error;

use crate::core::scoring::{build_match_reasons, calculate_match_score, to_match_score};
use crate::models::{InternshipPosting, MatchResult, ScoringWeights, UserProfile};
use crate::services::store::{InternshipStore, StoreError};

/// Combined scores at or below this are dropped
pub const DEFAULT_MIN_SCORE: f64 = 0.3;
/// Results returned when the caller does not ask for a count
pub const DEFAULT_LIMIT: usize = 5;

/// Errors surfaced by a ranking request
#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(#[from] StoreError),
}

/// Ranking orchestrator
///
/// # Pipeline Stages
/// 1. Profile validation
/// 2. Applied-posting exclusion
/// 3. Per-posting scoring (skills, education, location, interests)
/// 4. Threshold filter, stable sort, truncation
///
/// Holds only read-only configuration, so one instance can serve any number
/// of concurrent requests.
#[derive(Debug, Clone)]
pub struct Recommender {
    weights: ScoringWeights,
    min_score: f64,
}

impl Recommender {
    pub fn new(weights: ScoringWeights) -> Self {
        Self {
            weights,
            min_score: DEFAULT_MIN_SCORE,
        }
    }

    pub fn with_default_weights() -> Self {
        Self::new(ScoringWeights::default())
    }

    /// Override the minimum combined score (exclusive) a posting needs
    pub fn with_min_score(mut self, min_score: f64) -> Self {
        self.min_score = min_score;
        self
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Rank the store's postings for a profile
    ///
    /// # Arguments
    /// * `store` - Source of postings and applied ids
    /// * `profile` - The candidate; validated before anything is fetched
    /// * `exclude_applied_for` - Session whose applications are excluded
    /// * `limit` - Maximum number of results
    pub async fn rank<S>(
        &self,
        store: &S,
        profile: &UserProfile,
        exclude_applied_for: Option<&str>,
        limit: usize,
    ) -> Result<Vec<MatchResult>, RecommendError>
    where
        S: InternshipStore + ?Sized,
    {
        profile.check().map_err(RecommendError::InvalidProfile)?;

        let postings = store.fetch_all_postings().await?;
        let applied = match exclude_applied_for {
            Some(session_id) => store.fetch_applied_posting_ids(session_id).await?,
            None => HashSet::new(),
        };

        tracing::debug!(
            "Ranking {} postings for {} ({} excluded as applied)",
            postings.len(),
            profile.name,
            applied.len()
        );

        Ok(self.rank_postings(profile, postings, &applied, limit))
    }

    /// Score, filter, sort and truncate an already fetched snapshot
    pub fn rank_postings(
        &self,
        profile: &UserProfile,
        postings: Vec<InternshipPosting>,
        applied: &HashSet<String>,
        limit: usize,
    ) -> Vec<MatchResult> {
        let mut results: Vec<MatchResult> = postings
            .into_iter()
            // Stage 2: drop postings already applied to
            .filter(|posting| !applied.contains(&posting.id))
            // Stage 3 & 4: score and threshold
            .filter_map(|posting| {
                let breakdown = calculate_match_score(profile, &posting, &self.weights);

                if breakdown.combined <= self.min_score {
                    return None;
                }

                let match_reasons = build_match_reasons(&breakdown, profile, &posting);
                Some(MatchResult {
                    match_score: to_match_score(breakdown.combined),
                    match_reasons,
                    internship: posting,
                })
            })
            .collect();

        // Stable: equal scores keep catalog order
        results.sort_by(|a, b| {
            b.match_score
                .partial_cmp(&a.match_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        results.truncate(limit);
        results
    }
}

impl Default for Recommender {
    fn default() -> Self {
        Self::with_default_weights()
    }
}
