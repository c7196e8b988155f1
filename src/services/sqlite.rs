use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use std::collections::HashSet;
use std::time::Duration;

use crate::models::{Application, InternshipPosting, NewInternshipRequest, UserProfile};
use crate::services::store::{InternshipStore, StoreError};

const INTERNSHIP_COLUMNS: &str = "id, title, company, location, sector, duration, stipend, description, \
     required_skills, education_requirement, experience_required, remote_option, application_deadline";

/// SQLite-backed catalog of postings, profiles and applications
///
/// List-valued columns (skills, interests, locations) are stored as JSON
/// arrays so entries may contain commas.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Connect to a database file and run migrations
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout_secs: u64,
    ) -> Result<Self, StoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(acquire_timeout_secs))
            .idle_timeout(Duration::from_secs(600))
            .connect(database_url)
            .await?;

        Self::from_pool(pool).await
    }

    /// Private in-memory database. A single connection that never expires,
    /// since every SQLite memory connection is its own database.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        Self::from_pool(pool).await
    }

    async fn from_pool(pool: SqlitePool) -> Result<Self, StoreError> {
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    /// Seed the two sample postings when the catalog is empty
    pub async fn seed_sample_postings(&self) -> Result<usize, StoreError> {
        if self.count_internships().await? > 0 {
            return Ok(0);
        }

        let samples = sample_postings();
        let count = samples.len();
        for sample in samples {
            self.add_internship(sample).await?;
        }

        tracing::info!("Seeded {} sample internships", count);
        Ok(count)
    }

    async fn count_internships(&self) -> Result<i64, StoreError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM internships")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("total")?)
    }

    /// Insert a posting with the next `INT###` id and return it
    pub async fn add_internship(&self, req: NewInternshipRequest) -> Result<InternshipPosting, StoreError> {
        if req.required_skills.is_empty() {
            return Err(StoreError::InvalidInput("required_skills must not be empty".into()));
        }

        let id = format!("INT{:03}", self.count_internships().await? + 1);

        let query = r#"
            INSERT OR REPLACE INTO internships
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(&id)
            .bind(&req.title)
            .bind(&req.company)
            .bind(&req.location)
            .bind(&req.sector)
            .bind(&req.duration)
            .bind(&req.stipend)
            .bind(&req.description)
            .bind(encode_list(&req.required_skills)?)
            .bind(&req.education_requirement)
            .bind(&req.experience_required)
            .bind(req.remote_option)
            .bind(&req.application_deadline)
            .execute(&self.pool)
            .await?;

        tracing::debug!("Added internship {} ({})", id, req.title);

        self.get_internship(&id)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("internship {}", id)))
    }

    pub async fn get_internship(&self, internship_id: &str) -> Result<Option<InternshipPosting>, StoreError> {
        let query = format!("SELECT {} FROM internships WHERE id = ?", INTERNSHIP_COLUMNS);

        let row = sqlx::query(&query)
            .bind(internship_id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(posting_from_row).transpose()
    }

    pub async fn list_internships(&self) -> Result<Vec<InternshipPosting>, StoreError> {
        let query = format!("SELECT {} FROM internships ORDER BY id", INTERNSHIP_COLUMNS);
        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;
        rows.iter().map(posting_from_row).collect()
    }

    /// Save (or replace) a profile and return its session id
    pub async fn save_user_profile(&self, profile: &UserProfile) -> Result<String, StoreError> {
        let session_id = session_id_for(profile);

        let query = r#"
            INSERT OR REPLACE INTO user_profiles
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(&session_id)
            .bind(&profile.name)
            .bind(profile.age as i64)
            .bind(profile.education_level.as_str())
            .bind(&profile.field_of_study)
            .bind(encode_list(&profile.skills)?)
            .bind(encode_list(&profile.interests)?)
            .bind(&profile.location)
            .bind(encode_list(&profile.preferred_locations)?)
            .bind(&profile.experience_level)
            .bind(&profile.language_preference)
            .execute(&self.pool)
            .await?;

        tracing::debug!("Saved profile for session {}", session_id);
        Ok(session_id)
    }

    pub async fn get_user_profile(&self, session_id: &str) -> Result<Option<UserProfile>, StoreError> {
        let query = r#"
            SELECT name, age, education_level, field_of_study, skills, interests,
                   location, preferred_locations, experience_level, language_preference
            FROM user_profiles
            WHERE session_id = ?
        "#;

        let row = sqlx::query(query)
            .bind(session_id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(profile_from_row).transpose()
    }

    /// Record an application; both the session and the posting must exist
    pub async fn apply_to_internship(
        &self,
        session_id: &str,
        internship_id: &str,
    ) -> Result<Application, StoreError> {
        if self.get_internship(internship_id).await?.is_none() {
            return Err(StoreError::NotFound(format!("internship {}", internship_id)));
        }
        if self.get_user_profile(session_id).await?.is_none() {
            return Err(StoreError::NotFound(format!("user profile {}", session_id)));
        }

        let application = Application {
            application_id: format!("APP{}_{}", session_id, internship_id),
            user_id: session_id.to_string(),
            internship_id: internship_id.to_string(),
            status: "Applied".to_string(),
            applied_at: chrono::Utc::now(),
        };

        let query = r#"
            INSERT OR REPLACE INTO applications (application_id, user_id, internship_id, status, applied_at)
            VALUES (?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(&application.application_id)
            .bind(&application.user_id)
            .bind(&application.internship_id)
            .bind(&application.status)
            .bind(application.applied_at)
            .execute(&self.pool)
            .await?;

        tracing::info!("Session {} applied to {}", session_id, internship_id);
        Ok(application)
    }

    pub async fn get_applications_by_user(&self, session_id: &str) -> Result<Vec<Application>, StoreError> {
        let query = r#"
            SELECT application_id, user_id, internship_id, status, applied_at
            FROM applications
            WHERE user_id = ?
            ORDER BY applied_at
        "#;

        let rows = sqlx::query(query).bind(session_id).fetch_all(&self.pool).await?;

        rows.iter()
            .map(|row| {
                Ok(Application {
                    application_id: row.try_get("application_id")?,
                    user_id: row.try_get("user_id")?,
                    internship_id: row.try_get("internship_id")?,
                    status: row.try_get("status")?,
                    applied_at: row.try_get("applied_at")?,
                })
            })
            .collect()
    }

    /// Postings the session has applied to, skipping ones since removed
    pub async fn get_user_applied_internships(&self, session_id: &str) -> Result<Vec<InternshipPosting>, StoreError> {
        let query = format!(
            "SELECT {} FROM internships i JOIN applications a ON a.internship_id = i.id \
             WHERE a.user_id = ? ORDER BY a.applied_at",
            INTERNSHIP_COLUMNS
                .split(", ")
                .map(|c| format!("i.{}", c))
                .collect::<Vec<_>>()
                .join(", ")
        );

        let rows = sqlx::query(&query).bind(session_id).fetch_all(&self.pool).await?;
        rows.iter().map(posting_from_row).collect()
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

#[async_trait]
impl InternshipStore for SqliteStore {
    async fn fetch_all_postings(&self) -> Result<Vec<InternshipPosting>, StoreError> {
        self.list_internships().await
    }

    async fn fetch_applied_posting_ids(&self, session_id: &str) -> Result<HashSet<String>, StoreError> {
        let rows = sqlx::query("SELECT internship_id FROM applications WHERE user_id = ?")
            .bind(session_id)
            .fetch_all(&self.pool)
            .await?;

        let ids = rows
            .iter()
            .map(|row| row.try_get::<String, _>("internship_id"))
            .collect::<Result<HashSet<_>, _>>()?;

        tracing::debug!("Session {} has applied to {} internships", session_id, ids.len());
        Ok(ids)
    }
}

/// Session id derived from the profile, stable across resubmissions
pub fn session_id_for(profile: &UserProfile) -> String {
    format!("user_{}_{}", profile.name, profile.skills.len())
}

fn encode_list(items: &[String]) -> Result<String, StoreError> {
    Ok(serde_json::to_string(items)?)
}

fn decode_list(column: &str, raw: &str) -> Result<Vec<String>, StoreError> {
    serde_json::from_str(raw).map_err(|e| StoreError::CorruptRow(format!("{}: {}", column, e)))
}

fn posting_from_row(row: &SqliteRow) -> Result<InternshipPosting, StoreError> {
    let remote: i64 = row.try_get("remote_option")?;
    let required: String = row.try_get("required_skills")?;

    Ok(InternshipPosting {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        company: row.try_get("company")?,
        location: row.try_get("location")?,
        sector: row.try_get("sector")?,
        duration: row.try_get("duration")?,
        stipend: row.try_get("stipend")?,
        description: row.try_get("description")?,
        required_skills: decode_list("required_skills", &required)?,
        education_requirement: row.try_get("education_requirement")?,
        experience_required: row.try_get("experience_required")?,
        remote_option: remote != 0,
        application_deadline: row.try_get("application_deadline")?,
    })
}

fn profile_from_row(row: &SqliteRow) -> Result<UserProfile, StoreError> {
    let age: i64 = row.try_get("age")?;
    let education: String = row.try_get("education_level")?;
    let skills: String = row.try_get("skills")?;
    let interests: String = row.try_get("interests")?;
    let preferred: String = row.try_get("preferred_locations")?;

    Ok(UserProfile {
        name: row.try_get("name")?,
        age: u8::try_from(age).map_err(|_| StoreError::CorruptRow(format!("age {}", age)))?,
        education_level: education.parse().map_err(StoreError::CorruptRow)?,
        field_of_study: row.try_get("field_of_study")?,
        skills: decode_list("skills", &skills)?,
        interests: decode_list("interests", &interests)?,
        location: row.try_get("location")?,
        preferred_locations: decode_list("preferred_locations", &preferred)?,
        experience_level: row.try_get("experience_level")?,
        language_preference: row.try_get("language_preference")?,
    })
}

fn sample_postings() -> Vec<NewInternshipRequest> {
    vec![
        NewInternshipRequest {
            title: "Software Development Intern".to_string(),
            company: "TechCorp India".to_string(),
            location: "Bangalore".to_string(),
            sector: "Technology".to_string(),
            duration: "3 months".to_string(),
            stipend: Some("₹15,000/month".to_string()),
            description: "Work on web applications using Python and React".to_string(),
            required_skills: vec![
                "Python".to_string(),
                "JavaScript".to_string(),
                "React".to_string(),
                "Database".to_string(),
            ],
            education_requirement: "undergraduate".to_string(),
            experience_required: "beginner".to_string(),
            remote_option: true,
            application_deadline: "2025-10-15".to_string(),
        },
        NewInternshipRequest {
            title: "Digital Marketing Intern".to_string(),
            company: "Marketing Solutions Ltd".to_string(),
            location: "Mumbai".to_string(),
            sector: "Marketing".to_string(),
            duration: "2 months".to_string(),
            stipend: Some("₹12,000/month".to_string()),
            description: "Assist in social media campaigns and content creation".to_string(),
            required_skills: vec![
                "Social Media".to_string(),
                "Content Writing".to_string(),
                "Analytics".to_string(),
                "Communication".to_string(),
            ],
            education_requirement: "undergraduate".to_string(),
            experience_required: "beginner".to_string(),
            remote_option: true,
            application_deadline: "2025-10-20".to_string(),
        },
    ]
}
