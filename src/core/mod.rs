// Core algorithm exports
pub mod education;
pub mod interests;
pub mod location;
pub mod recommender;
pub mod scoring;
pub mod skills;
pub mod text;

pub use education::{calculate_education_match, education_rank};
pub use interests::calculate_interest_match;
pub use location::calculate_location_match;
pub use recommender::{Recommender, RecommendError, DEFAULT_LIMIT, DEFAULT_MIN_SCORE};
pub use scoring::{build_match_reasons, calculate_match_score, to_match_score, ScoreBreakdown};
pub use skills::{calculate_skill_match, SKILL_SYNONYMS};
