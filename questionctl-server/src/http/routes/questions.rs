//! Question endpoints
//!
//! CRUD over single questions plus a transactional batch upsert on the
//! collection resource.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::http::error::ApiError;
use crate::http::extractors::{null_as_default, JsonBody, ValidQuestionId};
use crate::http::server::AppState;
use crate::models::{Question, QuestionId};

pub const QUESTIONS_PATH: &str = "/api/v1/questions";
pub const QUESTION_PATH: &str = "/api/v1/questions/{id}";

/// Create/update request. A missing or null `text` is treated as empty.
#[derive(Debug, Default, Deserialize)]
pub struct QuestionTextRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
}

/// One entry of a batch upsert
#[derive(Debug, Default, Deserialize)]
pub struct UpsertItem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
}

/// Batch upsert request
#[derive(Debug, Default, Deserialize)]
pub struct UpsertQuestionsRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub questions: Vec<UpsertItem>,
}

/// Question response
#[derive(Debug, Serialize)]
pub struct QuestionResponse {
    pub id: String,
    pub text: String,
}

impl From<Question> for QuestionResponse {
    fn from(q: Question) -> Self {
        Self {
            id: q.id.into_string(),
            text: q.text,
        }
    }
}

/// Question collection response
#[derive(Debug, Serialize)]
pub struct QuestionsResponse {
    pub questions: Vec<QuestionResponse>,
}

impl From<Vec<Question>> for QuestionsResponse {
    fn from(questions: Vec<Question>) -> Self {
        Self {
            questions: questions.into_iter().map(QuestionResponse::from).collect(),
        }
    }
}

/// GET /api/v1/questions/{id}
async fn get_question(
    State(state): State<Arc<AppState>>,
    ValidQuestionId(id): ValidQuestionId,
) -> Result<Json<QuestionResponse>, ApiError> {
    let question = state.store.get(&id).await?;
    Ok(Json(QuestionResponse::from(question)))
}

/// GET /api/v1/questions
async fn list_questions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<QuestionsResponse>, ApiError> {
    let questions = state.store.list().await?;
    Ok(Json(QuestionsResponse::from(questions)))
}

/// POST /api/v1/questions - create with a server-generated id
async fn create_question(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<QuestionTextRequest>,
) -> Result<Json<QuestionResponse>, ApiError> {
    let id = QuestionId::generate();
    let question = state.store.create(id, req.text).await?;

    tracing::info!(id = %question.id, "question created");
    Ok(Json(QuestionResponse::from(question)))
}

/// PUT /api/v1/questions/{id} - replace the text of one question
async fn update_question(
    State(state): State<Arc<AppState>>,
    ValidQuestionId(id): ValidQuestionId,
    JsonBody(req): JsonBody<QuestionTextRequest>,
) -> Result<Json<QuestionResponse>, ApiError> {
    let question = state.store.update(&id, req.text).await?;
    Ok(Json(QuestionResponse::from(question)))
}

/// DELETE /api/v1/questions/{id}
async fn delete_question(
    State(state): State<Arc<AppState>>,
    ValidQuestionId(id): ValidQuestionId,
) -> Result<StatusCode, ApiError> {
    state.store.delete(&id).await?;

    tracing::info!(%id, "question deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/questions - insert-or-update a batch atomically
async fn upsert_questions(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<UpsertQuestionsRequest>,
) -> Result<Json<QuestionsResponse>, ApiError> {
    let questions = req
        .questions
        .into_iter()
        .map(|item| -> Result<Question, ApiError> {
            Ok(Question::new(QuestionId::new(&item.id)?, item.text))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let count = questions.len();
    let written = state.store.upsert_batch(questions).await?;

    tracing::info!(count, "question batch upserted");
    Ok(Json(QuestionsResponse::from(written)))
}

/// Question routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            QUESTIONS_PATH,
            get(list_questions).post(create_question).put(upsert_questions),
        )
        .route(
            QUESTION_PATH,
            get(get_question).put(update_question).delete(delete_question),
        )
}
