// Integration tests for Intern Match

use actix_web::{test, web, App};
use intern_match::config::MatchingSettings;
use intern_match::core::{Recommender, RecommendError};
use intern_match::models::{EducationLevel, InternshipPosting, MatchResult, UserProfile};
use intern_match::routes::{self, AppState};
use intern_match::services::{InMemoryStore, SqliteStore};
use std::sync::Arc;

fn create_test_profile() -> UserProfile {
    UserProfile {
        name: "Ananya".to_string(),
        age: 21,
        education_level: EducationLevel::Undergraduate,
        field_of_study: "Computer Science".to_string(),
        skills: vec!["python".to_string(), "react".to_string(), "sql".to_string()],
        interests: vec!["technology".to_string(), "data science".to_string()],
        location: "Bangalore".to_string(),
        preferred_locations: vec!["Hyderabad".to_string()],
        experience_level: "beginner".to_string(),
        language_preference: "english".to_string(),
    }
}

fn create_test_posting(
    id: &str,
    sector: &str,
    location: &str,
    skills: &[&str],
    remote: bool,
) -> InternshipPosting {
    InternshipPosting {
        id: id.to_string(),
        title: format!("{} Intern", sector),
        company: format!("Company {}", id),
        location: location.to_string(),
        sector: sector.to_string(),
        duration: "3 months".to_string(),
        stipend: None,
        description: format!("Hands-on work in {}", sector.to_lowercase()),
        required_skills: skills.iter().map(|s| s.to_string()).collect(),
        education_requirement: "undergraduate".to_string(),
        experience_required: "beginner".to_string(),
        remote_option: remote,
        application_deadline: "2025-12-31".to_string(),
    }
}

fn catalog() -> InMemoryStore {
    InMemoryStore::new(vec![
        create_test_posting("INT001", "Technology", "Bangalore", &["Python", "React", "Database"], false),
        create_test_posting("INT002", "Finance", "Kolkata", &["Tally", "Excel"], false),
        create_test_posting("INT003", "Data Science", "Chennai", &["Python", "SQL"], true),
        create_test_posting("INT004", "Technology", "Hyderabad", &["Java"], false),
        create_test_posting("INT005", "Healthcare", "Delhi", &["Nursing"], false),
        create_test_posting("INT006", "Technology", "Bangalore", &["Python", "React", "Database"], false),
    ])
}

fn assert_sorted(results: &[MatchResult]) {
    for pair in results.windows(2) {
        assert!(
            pair[0].match_score >= pair[1].match_score,
            "Results not sorted by score"
        );
    }
}

#[tokio::test]
async fn test_integration_end_to_end_ranking() {
    let recommender = Recommender::with_default_weights();
    let store = catalog();

    let results = recommender
        .rank(&store, &create_test_profile(), None, 10)
        .await
        .unwrap();

    // Finance and healthcare postings fall under the threshold
    let ids: Vec<&str> = results.iter().map(|r| r.internship.id.as_str()).collect();
    assert!(!ids.contains(&"INT002"));
    assert!(!ids.contains(&"INT005"));
    assert_sorted(&results);

    for r in &results {
        assert!(r.match_score > 30.0 && r.match_score <= 100.0, "Score {} out of range", r.match_score);
        // One decimal place
        assert!(((r.match_score * 10.0).round() - r.match_score * 10.0).abs() < 1e-6);
    }

    // Identical postings tie and keep catalog order
    let first = ids.iter().position(|id| *id == "INT001").unwrap();
    let second = ids.iter().position(|id| *id == "INT006").unwrap();
    assert_eq!(second, first + 1);
}

#[tokio::test]
async fn test_remote_posting_reason() {
    let recommender = Recommender::with_default_weights();
    let mut profile = create_test_profile();
    profile.location = "Nowhere".to_string();
    profile.preferred_locations.clear();

    let store = InMemoryStore::default()
        .with_posting(create_test_posting("R1", "Technology", "Anywhere", &["Python"], true));

    let results = recommender.rank(&store, &profile, None, 5).await.unwrap();

    assert_eq!(results.len(), 1);
    assert!(results[0].match_reasons.contains(&"Remote work available".to_string()));
}

#[tokio::test]
async fn test_applied_never_returned() {
    let recommender = Recommender::with_default_weights();
    let store = catalog()
        .with_application("user_Ananya_3", "INT001")
        .with_application("user_Ananya_3", "INT003");

    let results = recommender
        .rank(&store, &create_test_profile(), Some("user_Ananya_3"), 10)
        .await
        .unwrap();

    assert!(results
        .iter()
        .all(|r| r.internship.id != "INT001" && r.internship.id != "INT003"));

    // Unknown session excludes nothing
    let unfiltered = recommender
        .rank(&store, &create_test_profile(), Some("someone_else"), 10)
        .await
        .unwrap();
    assert!(unfiltered.len() > results.len());
}

#[tokio::test]
async fn test_max_limit_enforcement() {
    let recommender = Recommender::with_default_weights();
    let store = InMemoryStore::new(
        (0..50)
            .map(|i| create_test_posting(&format!("INT{:03}", i), "Technology", "Bangalore", &["Python"], i % 2 == 0))
            .collect(),
    );

    for limit in [1, 5, 10] {
        let results = recommender.rank(&store, &create_test_profile(), None, limit).await.unwrap();
        assert_eq!(results.len(), limit, "Should return exactly {} results", limit);
        assert_sorted(&results);
    }
}

#[tokio::test]
async fn test_rank_is_idempotent() {
    let recommender = Recommender::with_default_weights();
    let store = catalog();
    let profile = create_test_profile();

    let first = recommender.rank(&store, &profile, None, 5).await.unwrap();
    let second = recommender.rank(&store, &profile, None, 5).await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_invalid_profile_rejected_before_scoring() {
    let recommender = Recommender::with_default_weights();
    let mut profile = create_test_profile();
    profile.skills.clear();

    let err = recommender.rank(&catalog(), &profile, None, 5).await.unwrap_err();
    assert!(matches!(err, RecommendError::InvalidProfile(_)));
}

#[tokio::test]
async fn test_sqlite_store_drives_ranking() {
    let store = SqliteStore::in_memory().await.unwrap();
    store.seed_sample_postings().await.unwrap();

    let profile = create_test_profile();
    let session_id = store.save_user_profile(&profile).await.unwrap();
    let recommender = Recommender::with_default_weights();

    let before = recommender.rank(&store, &profile, Some(&session_id), 5).await.unwrap();
    assert_eq!(before[0].internship.id, "INT001");

    store.apply_to_internship(&session_id, "INT001").await.unwrap();

    let after = recommender.rank(&store, &profile, Some(&session_id), 5).await.unwrap();
    assert!(after.iter().all(|r| r.internship.id != "INT001"));
}

async fn app_state() -> AppState {
    let store = SqliteStore::in_memory().await.unwrap();
    store.seed_sample_postings().await.unwrap();

    AppState {
        store: Arc::new(store),
        recommender: Recommender::with_default_weights(),
        matching: MatchingSettings::default(),
    }
}

#[actix_web::test]
async fn test_http_profile_and_recommendations() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(app_state().await))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/profiles")
        .set_json(serde_json::json!({
            "name": "Rahul",
            "age": 23,
            "education_level": "undergraduate",
            "field_of_study": "Computer Engineering",
            "skills": "python, react",
            "interests": "technology",
            "location": "Bangalore",
        }))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["session_id"], "user_Rahul_2");
    assert_eq!(body["recommendations"][0]["internship"]["id"], "INT001");

    let req = test::TestRequest::post()
        .uri("/api/v1/applications")
        .set_json(serde_json::json!({ "session_id": "user_Rahul_2", "internship_id": "INT001" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let req = test::TestRequest::get()
        .uri("/api/v1/recommendations/user_Rahul_2?limit=5")
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    let recs = body["recommendations"].as_array().unwrap();
    assert!(recs.iter().all(|r| r["internship"]["id"] != "INT001"));

    let req = test::TestRequest::get()
        .uri("/api/v1/applications/user_Rahul_2")
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["total"], 1);
}

#[actix_web::test]
async fn test_http_rejects_invalid_profile() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(app_state().await))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/profiles")
        .set_json(serde_json::json!({
            "name": "Old Timer",
            "age": 40,
            "education_level": "postgraduate",
            "field_of_study": "History",
            "skills": "research",
            "interests": "archives",
            "location": "Delhi",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let req = test::TestRequest::get()
        .uri("/api/v1/recommendations/unknown_session")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn test_http_profile_list_entries_with_commas() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(app_state().await))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/profiles")
        .set_json(serde_json::json!({
            "name": "Meera",
            "age": 20,
            "education_level": "diploma",
            "field_of_study": "Electronics",
            "skills": ["c, c++", "python"],
            "interests": ["embedded systems"],
            "location": "Chennai",
        }))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["session_id"], "user_Meera_2");
    let first = body["recommendations"].clone();

    let req = test::TestRequest::get()
        .uri("/api/v1/recommendations/user_Meera_2")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    // The stored profile scores the same as the submitted one
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["recommendations"], first);
}
