// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Application, EducationLevel, InternshipPosting, MatchResult, ScoringWeights, UserProfile, WeightsError};
pub use requests::{ApplyRequest, CreateProfileRequest, NewInternshipRequest, RecommendationQuery};
pub use responses::{ApplicationsResponse, ErrorResponse, HealthResponse, InternshipsResponse, RecommendationResponse};
