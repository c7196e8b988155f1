//! Intern Match - explainable internship recommendations
//!
//! This library scores a candidate profile against a catalog of internship
//! postings across skills, education, location and interests, and returns a
//! ranked shortlist with human-readable match reasons.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{Recommender, RecommendError};
pub use models::{EducationLevel, InternshipPosting, MatchResult, ScoringWeights, UserProfile};
pub use services::{InMemoryStore, InternshipStore, SqliteStore, StoreError};
