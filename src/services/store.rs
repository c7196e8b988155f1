use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

use crate::models::InternshipPosting;

/// Errors that can occur when reading from or writing to storage
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Corrupt row: {0}")]
    CorruptRow(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Read capabilities the ranking engine needs from storage
///
/// Implementations must return a consistent snapshot per call; ordering of
/// postings is not significant.
#[async_trait]
pub trait InternshipStore: Send + Sync {
    /// All postings currently in the catalog
    async fn fetch_all_postings(&self) -> Result<Vec<InternshipPosting>, StoreError>;

    /// Ids of the postings the session has applied to (empty when unknown)
    async fn fetch_applied_posting_ids(&self, session_id: &str) -> Result<HashSet<String>, StoreError>;
}

/// Fixed in-memory snapshot, used by tests and benchmarks
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    postings: Vec<InternshipPosting>,
    applications: HashMap<String, HashSet<String>>,
}

impl InMemoryStore {
    pub fn new(postings: Vec<InternshipPosting>) -> Self {
        Self {
            postings,
            applications: HashMap::new(),
        }
    }

    pub fn with_posting(mut self, posting: InternshipPosting) -> Self {
        self.postings.push(posting);
        self
    }

    pub fn with_application(mut self, session_id: &str, internship_id: &str) -> Self {
        self.applications
            .entry(session_id.to_string())
            .or_default()
            .insert(internship_id.to_string());
        self
    }

    pub fn postings(&self) -> &[InternshipPosting] {
        &self.postings
    }
}

#[async_trait]
impl InternshipStore for InMemoryStore {
    async fn fetch_all_postings(&self) -> Result<Vec<InternshipPosting>, StoreError> {
        Ok(self.postings.clone())
    }

    async fn fetch_applied_posting_ids(&self, session_id: &str) -> Result<HashSet<String>, StoreError> {
        Ok(self.applications.get(session_id).cloned().unwrap_or_default())
    }
}
