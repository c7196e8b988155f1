use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::config::MatchingSettings;
use crate::core::{RecommendError, Recommender};
use crate::models::{
    ApplicationsResponse, ApplyRequest, CreateProfileRequest, ErrorResponse, HealthResponse,
    InternshipsResponse, NewInternshipRequest, RecommendationQuery, RecommendationResponse,
    UserProfile,
};
use crate::services::{SqliteStore, StoreError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SqliteStore>,
    pub recommender: Recommender,
    pub matching: MatchingSettings,
}

/// Configure all recommendation-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/internships", web::get().to(list_internships))
        .route("/internships", web::post().to(add_internship))
        .route("/profiles", web::post().to(create_profile))
        .route("/recommendations/{session_id}", web::get().to(get_recommendations))
        .route("/applications", web::post().to(apply))
        .route("/applications/{session_id}", web::get().to(list_applications));
}

fn error_response(status_code: u16, error: &str, message: String) -> HttpResponse {
    let body = ErrorResponse {
        error: error.to_string(),
        message,
        status_code,
    };
    match status_code {
        400 => HttpResponse::BadRequest().json(body),
        404 => HttpResponse::NotFound().json(body),
        _ => HttpResponse::InternalServerError().json(body),
    }
}

fn store_error_response(context: &str, err: StoreError) -> HttpResponse {
    match err {
        StoreError::NotFound(what) => error_response(404, "Not found", what),
        StoreError::InvalidInput(msg) => error_response(400, "Invalid input", msg),
        other => {
            tracing::error!("{}: {}", context, other);
            error_response(500, context, other.to_string())
        }
    }
}

fn recommend_error_response(err: RecommendError) -> HttpResponse {
    match err {
        RecommendError::InvalidProfile(msg) => error_response(400, "Invalid profile", msg),
        RecommendError::StorageUnavailable(e) => store_error_response("Failed to rank internships", e),
    }
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let db_healthy = state.store.health_check().await.unwrap_or(false);

    let status = if db_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// List all postings
///
/// GET /api/v1/internships
async fn list_internships(state: web::Data<AppState>) -> impl Responder {
    match state.store.list_internships().await {
        Ok(internships) => HttpResponse::Ok().json(InternshipsResponse {
            total: internships.len(),
            internships,
        }),
        Err(e) => store_error_response("Failed to list internships", e),
    }
}

/// Add a posting
///
/// POST /api/v1/internships
///
/// `required_skills` may be a JSON array or a comma-separated string.
async fn add_internship(
    state: web::Data<AppState>,
    req: web::Json<NewInternshipRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(400, "Validation failed", errors.to_string());
    }

    match state.store.add_internship(req.into_inner()).await {
        Ok(posting) => {
            tracing::info!("Added internship {} at {}", posting.id, posting.company);
            HttpResponse::Created().json(posting)
        }
        Err(e) => store_error_response("Failed to add internship", e),
    }
}

/// Create a profile and return its first recommendations
///
/// POST /api/v1/profiles
///
/// Request body:
/// ```json
/// {
///   "name": "string",
///   "age": 21,
///   "education_level": "high_school|diploma|undergraduate|postgraduate",
///   "field_of_study": "string",
///   "skills": "python, react",
///   "interests": ["technology"],
///   "location": "string",
///   "preferred_locations": "Pune, Mumbai",
///   "experience_level": "beginner",
///   "language_preference": "english"
/// }
/// ```
async fn create_profile(
    state: web::Data<AppState>,
    req: web::Json<CreateProfileRequest>,
) -> impl Responder {
    let profile = match UserProfile::try_from(req.into_inner()) {
        Ok(profile) => profile,
        Err(msg) => {
            tracing::info!("Rejected profile submission: {}", msg);
            return error_response(400, "Invalid profile", msg);
        }
    };

    let session_id = match state.store.save_user_profile(&profile).await {
        Ok(id) => id,
        Err(e) => return store_error_response("Failed to save profile", e),
    };

    respond_with_recommendations(&state, session_id, profile, None).await
}

/// Recommendations for a saved profile, excluding postings already applied to
///
/// GET /api/v1/recommendations/{session_id}?limit=5
async fn get_recommendations(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<RecommendationQuery>,
) -> impl Responder {
    let session_id = path.into_inner();

    let profile = match state.store.get_user_profile(&session_id).await {
        Ok(Some(profile)) => profile,
        Ok(None) => {
            return error_response(404, "User session not found", format!("No profile for session {}", session_id));
        }
        Err(e) => return store_error_response("Failed to fetch profile", e),
    };

    respond_with_recommendations(&state, session_id, profile, query.limit).await
}

async fn respond_with_recommendations(
    state: &AppState,
    session_id: String,
    profile: UserProfile,
    limit: Option<usize>,
) -> HttpResponse {
    let limit = state.matching.resolve_limit(limit);

    tracing::info!("Ranking internships for session: {}, limit: {}", session_id, limit);

    let recommendations = match state
        .recommender
        .rank(state.store.as_ref(), &profile, Some(&session_id), limit)
        .await
    {
        Ok(results) => results,
        Err(e) => return recommend_error_response(e),
    };

    tracing::info!(
        "Returning {} recommendations for session {}",
        recommendations.len(),
        session_id
    );

    HttpResponse::Ok().json(RecommendationResponse {
        session_id,
        user_name: profile.name,
        total_matches: recommendations.len(),
        recommendations,
    })
}

/// Apply to a posting
///
/// POST /api/v1/applications
///
/// Request body:
/// ```json
/// { "session_id": "string", "internship_id": "INT001" }
/// ```
async fn apply(
    state: web::Data<AppState>,
    req: web::Json<ApplyRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(400, "Validation failed", errors.to_string());
    }

    match state.store.apply_to_internship(&req.session_id, &req.internship_id).await {
        Ok(application) => HttpResponse::Ok().json(application),
        Err(e) => store_error_response("Failed to record application", e),
    }
}

/// Postings a session has applied to
///
/// GET /api/v1/applications/{session_id}
async fn list_applications(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let session_id = path.into_inner();

    match state.store.get_user_applied_internships(&session_id).await {
        Ok(applications) => HttpResponse::Ok().json(ApplicationsResponse {
            session_id,
            total: applications.len(),
            applications,
        }),
        Err(e) => store_error_response("Failed to fetch applications", e),
    }
}
