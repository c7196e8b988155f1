use serde::{Deserialize, Serialize};
use crate::models::domain::{InternshipPosting, MatchResult};

/// Response for the recommendation endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub session_id: String,
    pub user_name: String,
    pub recommendations: Vec<MatchResult>,
    pub total_matches: usize,
}

/// Listing of internship postings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InternshipsResponse {
    pub internships: Vec<InternshipPosting>,
    pub total: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Postings a session has applied to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationsResponse {
    pub session_id: String,
    pub applications: Vec<InternshipPosting>,
    pub total: usize,
}
