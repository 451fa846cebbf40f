//! questionctl-server: HTTP service for questions
//!
//! Exposes CRUD and transactional batch upsert over a single `questions`
//! table, with PostgreSQL or in-memory storage behind one gateway trait.

pub mod db;
pub mod http;
pub mod models;

pub use db::{DbError, MemoryQuestionStore, PgQuestionStore, QuestionStore};
pub use http::{build_router, run_server, ApiError, AppState, ServerConfig, ServerError};
pub use models::{Question, QuestionId, ValidationError};
