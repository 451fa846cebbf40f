//! Persistence gateway contract
//!
//! Handlers talk to storage only through [`QuestionStore`], so the HTTP layer
//! can run against PostgreSQL in production and an in-memory store in tests.

use async_trait::async_trait;

use crate::models::{Question, QuestionId};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("conflict: {resource} '{id}' already exists")]
    Conflict { resource: &'static str, id: String },

    /// Write rejected by the storage backend outside of sqlx (in-memory store)
    #[error("storage error: {message}")]
    Storage { message: String },
}

impl DbError {
    pub(crate) fn question_not_found(id: &QuestionId) -> Self {
        Self::NotFound {
            resource: "question",
            id: id.as_str().to_owned(),
        }
    }

    pub(crate) fn question_conflict(id: &QuestionId) -> Self {
        Self::Conflict {
            resource: "question",
            id: id.as_str().to_owned(),
        }
    }
}

/// Storage operations over the question entity.
#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// Fetch a single question, `NotFound` if absent.
    async fn get(&self, id: &QuestionId) -> Result<Question, DbError>;

    /// Fetch every live question. Order is not part of the contract.
    async fn list(&self) -> Result<Vec<Question>, DbError>;

    /// Insert a new question, `Conflict` if the id is taken.
    async fn create(&self, id: QuestionId, text: String) -> Result<Question, DbError>;

    /// Replace the text of an existing question, `NotFound` if absent.
    async fn update(&self, id: &QuestionId, text: String) -> Result<Question, DbError>;

    /// Permanently remove a question, `NotFound` if absent.
    async fn delete(&self, id: &QuestionId) -> Result<(), DbError>;

    /// Insert-or-update every question in one atomic batch.
    ///
    /// Items are applied in input order, so the last occurrence of an id wins.
    /// If any item fails nothing from the batch is kept.
    async fn upsert_batch(&self, questions: Vec<Question>) -> Result<Vec<Question>, DbError>;
}
