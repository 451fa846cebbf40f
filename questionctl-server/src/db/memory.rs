//! In-memory question store
//!
//! Same semantics as the PostgreSQL store, including batch atomicity and the
//! TEXT column's refusal of NUL bytes. Backs `serve --in-memory` and the
//! router tests.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::{DbError, QuestionStore};
use crate::models::{Question, QuestionId};

#[derive(Debug, Clone)]
struct StoredQuestion {
    text: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Question store held in process memory
#[derive(Default)]
pub struct MemoryQuestionStore {
    rows: RwLock<HashMap<QuestionId, StoredQuestion>>,
}

impl MemoryQuestionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn check_text(text: &str) -> Result<(), DbError> {
    if text.contains('\0') {
        return Err(DbError::Storage {
            message: "text contains a NUL byte".into(),
        });
    }
    Ok(())
}

#[async_trait]
impl QuestionStore for MemoryQuestionStore {
    async fn get(&self, id: &QuestionId) -> Result<Question, DbError> {
        let rows = self.rows.read().await;
        rows.get(id)
            .map(|row| Question::new(id.clone(), row.text.clone()))
            .ok_or_else(|| DbError::question_not_found(id))
    }

    async fn list(&self) -> Result<Vec<Question>, DbError> {
        let rows = self.rows.read().await;
        let mut entries: Vec<_> = rows.iter().collect();
        entries.sort_by(|(a_id, a), (b_id, b)| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a_id.as_str().cmp(b_id.as_str()))
        });

        Ok(entries
            .into_iter()
            .map(|(id, row)| Question::new(id.clone(), row.text.clone()))
            .collect())
    }

    async fn create(&self, id: QuestionId, text: String) -> Result<Question, DbError> {
        check_text(&text)?;
        let mut rows = self.rows.write().await;
        if rows.contains_key(&id) {
            return Err(DbError::question_conflict(&id));
        }

        let now = Utc::now();
        rows.insert(
            id.clone(),
            StoredQuestion {
                text: text.clone(),
                created_at: now,
                updated_at: now,
            },
        );
        Ok(Question::new(id, text))
    }

    async fn update(&self, id: &QuestionId, text: String) -> Result<Question, DbError> {
        check_text(&text)?;
        let mut rows = self.rows.write().await;
        let row = rows
            .get_mut(id)
            .ok_or_else(|| DbError::question_not_found(id))?;

        row.text.clone_from(&text);
        row.updated_at = Utc::now();
        Ok(Question::new(id.clone(), text))
    }

    async fn delete(&self, id: &QuestionId) -> Result<(), DbError> {
        let mut rows = self.rows.write().await;
        rows.remove(id)
            .map(|_| ())
            .ok_or_else(|| DbError::question_not_found(id))
    }

    async fn upsert_batch(&self, questions: Vec<Question>) -> Result<Vec<Question>, DbError> {
        let mut rows = self.rows.write().await;

        // Only touched ids are staged; the live map is written once every item passed.
        let now = Utc::now();
        let mut staged: HashMap<QuestionId, StoredQuestion> = HashMap::new();
        for question in &questions {
            check_text(&question.text)?;
            let created_at = staged
                .get(&question.id)
                .or_else(|| rows.get(&question.id))
                .map_or(now, |row| row.created_at);
            staged.insert(
                question.id.clone(),
                StoredQuestion {
                    text: question.text.clone(),
                    created_at,
                    updated_at: now,
                },
            );
        }

        rows.extend(staged);
        Ok(questions)
    }
}
