//! PostgreSQL question store
//!
//! - create: plain INSERT, unique violation mapped to Conflict (no check-then-insert)
//! - delete: hard DELETE, the soft-delete marker is only honoured by reads
//! - upsert_batch: one transaction, `ON CONFLICT (id) DO UPDATE` per item

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use super::{DbError, QuestionStore};
use crate::models::{Question, QuestionId};

/// Question columns exposed to callers
#[derive(Debug, Clone, FromRow)]
struct QuestionRow {
    id: String,
    text: String,
}

impl From<QuestionRow> for Question {
    fn from(row: QuestionRow) -> Self {
        Question::new(QuestionId::from_storage(row.id), row.text)
    }
}

/// Question store backed by a sqlx connection pool
#[derive(Clone)]
pub struct PgQuestionStore {
    pool: PgPool,
}

impl PgQuestionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl QuestionStore for PgQuestionStore {
    async fn get(&self, id: &QuestionId) -> Result<Question, DbError> {
        tracing::debug!(%id, "fetching question");
        let row: QuestionRow = sqlx::query_as(
            r#"
            SELECT id, text
            FROM questions
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::question_not_found(id))?;

        Ok(row.into())
    }

    async fn list(&self) -> Result<Vec<Question>, DbError> {
        let rows: Vec<QuestionRow> = sqlx::query_as(
            r#"
            SELECT id, text
            FROM questions
            WHERE deleted_at IS NULL
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!(count = rows.len(), "listed questions");
        Ok(rows.into_iter().map(Question::from).collect())
    }

    async fn create(&self, id: QuestionId, text: String) -> Result<Question, DbError> {
        tracing::debug!(%id, "creating question");
        let row: QuestionRow = sqlx::query_as(
            r#"
            INSERT INTO questions (id, text)
            VALUES ($1, $2)
            RETURNING id, text
            "#,
        )
        .bind(id.as_str())
        .bind(&text)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                DbError::question_conflict(&id)
            }
            other => DbError::Sqlx(other),
        })?;

        Ok(row.into())
    }

    async fn update(&self, id: &QuestionId, text: String) -> Result<Question, DbError> {
        tracing::debug!(%id, "updating question");
        let row: QuestionRow = sqlx::query_as(
            r#"
            UPDATE questions
            SET text = $2, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING id, text
            "#,
        )
        .bind(id.as_str())
        .bind(&text)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::question_not_found(id))?;

        Ok(row.into())
    }

    async fn delete(&self, id: &QuestionId) -> Result<(), DbError> {
        tracing::debug!(%id, "deleting question");
        let result = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::question_not_found(id));
        }
        Ok(())
    }

    async fn upsert_batch(&self, questions: Vec<Question>) -> Result<Vec<Question>, DbError> {
        tracing::debug!(count = questions.len(), "upserting question batch");

        // Dropping `tx` on an early return rolls the whole batch back.
        let mut tx = self.pool.begin().await?;
        let mut written = Vec::with_capacity(questions.len());

        for question in &questions {
            // created_at keeps its original value on conflict
            let row: QuestionRow = sqlx::query_as(
                r#"
                INSERT INTO questions (id, text)
                VALUES ($1, $2)
                ON CONFLICT (id) DO UPDATE
                SET text = EXCLUDED.text,
                    updated_at = NOW(),
                    deleted_at = NULL
                RETURNING id, text
                "#,
            )
            .bind(question.id.as_str())
            .bind(&question.text)
            .fetch_one(&mut *tx)
            .await?;

            written.push(Question::from(row));
        }

        tx.commit().await?;
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MIGRATOR;
    use chrono::{DateTime, Utc};

    // Integration tests - run with DATABASE_URL set
    // cargo test -p questionctl-server -- --ignored

    fn id(s: &str) -> QuestionId {
        QuestionId::new(s).unwrap()
    }

    #[sqlx::test(migrator = "MIGRATOR")]
    #[ignore = "requires database"]
    async fn create_then_get(pool: PgPool) -> Result<(), DbError> {
        let store = PgQuestionStore::new(pool);
        let created = store.create(id("q1"), "hello".into()).await?;
        assert_eq!(created.text, "hello");

        let fetched = store.get(&id("q1")).await?;
        assert_eq!(fetched, created);
        Ok(())
    }

    #[sqlx::test(migrator = "MIGRATOR")]
    #[ignore = "requires database"]
    async fn duplicate_create_conflicts(pool: PgPool) -> Result<(), DbError> {
        let store = PgQuestionStore::new(pool);
        store.create(id("q1"), "a".into()).await?;

        let err = store.create(id("q1"), "b".into()).await.unwrap_err();
        assert!(matches!(err, DbError::Conflict { .. }));
        Ok(())
    }

    #[sqlx::test(migrator = "MIGRATOR")]
    #[ignore = "requires database"]
    async fn update_and_delete_missing_are_not_found(pool: PgPool) -> Result<(), DbError> {
        let store = PgQuestionStore::new(pool);

        let err = store.update(&id("missing"), "x".into()).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));

        let err = store.delete(&id("missing")).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
        Ok(())
    }

    #[sqlx::test(migrator = "MIGRATOR")]
    #[ignore = "requires database"]
    async fn delete_removes_row(pool: PgPool) -> Result<(), DbError> {
        let store = PgQuestionStore::new(pool.clone());
        store.create(id("q1"), "a".into()).await?;
        store.delete(&id("q1")).await?;

        let remaining: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM questions")
            .fetch_one(&pool)
            .await?;
        assert_eq!(remaining.0, 0);
        Ok(())
    }

    #[sqlx::test(migrator = "MIGRATOR")]
    #[ignore = "requires database"]
    async fn list_skips_soft_deleted_rows(pool: PgPool) -> Result<(), DbError> {
        let store = PgQuestionStore::new(pool.clone());
        store.create(id("live"), "a".into()).await?;
        store.create(id("gone"), "b".into()).await?;
        sqlx::query("UPDATE questions SET deleted_at = NOW() WHERE id = 'gone'")
            .execute(&pool)
            .await?;

        let all = store.list().await?;
        assert_eq!(all, vec![Question::new(id("live"), "a")]);
        assert!(matches!(
            store.get(&id("gone")).await,
            Err(DbError::NotFound { .. })
        ));
        Ok(())
    }

    #[sqlx::test(migrator = "MIGRATOR")]
    #[ignore = "requires database"]
    async fn upsert_preserves_created_at(pool: PgPool) -> Result<(), DbError> {
        let store = PgQuestionStore::new(pool.clone());
        store
            .upsert_batch(vec![Question::new(id("q1"), "a")])
            .await?;
        let before =
            sqlx::query_scalar::<_, DateTime<Utc>>("SELECT created_at FROM questions WHERE id = 'q1'")
                .fetch_one(&pool)
                .await?;

        store
            .upsert_batch(vec![Question::new(id("q1"), "b")])
            .await?;
        let (after, text): (DateTime<Utc>, String) =
            sqlx::query_as("SELECT created_at, text FROM questions WHERE id = 'q1'")
                .fetch_one(&pool)
                .await?;

        assert_eq!(before, after);
        assert_eq!(text, "b");
        Ok(())
    }

    #[sqlx::test(migrator = "MIGRATOR")]
    #[ignore = "requires database"]
    async fn upsert_revives_soft_deleted_row(pool: PgPool) -> Result<(), DbError> {
        let store = PgQuestionStore::new(pool.clone());
        store.create(id("q1"), "old".into()).await?;
        sqlx::query("UPDATE questions SET deleted_at = NOW() WHERE id = 'q1'")
            .execute(&pool)
            .await?;
        assert!(matches!(
            store.get(&id("q1")).await,
            Err(DbError::NotFound { .. })
        ));

        store
            .upsert_batch(vec![Question::new(id("q1"), "new")])
            .await?;

        assert_eq!(store.get(&id("q1")).await?, Question::new(id("q1"), "new"));
        Ok(())
    }

    #[sqlx::test(migrator = "MIGRATOR")]
    #[ignore = "requires database"]
    async fn last_duplicate_in_batch_wins(pool: PgPool) -> Result<(), DbError> {
        let store = PgQuestionStore::new(pool);
        store
            .upsert_batch(vec![
                Question::new(id("a"), "first"),
                Question::new(id("a"), "last"),
            ])
            .await?;

        assert_eq!(store.get(&id("a")).await?.text, "last");
        assert_eq!(store.list().await?.len(), 1);
        Ok(())
    }

    #[sqlx::test(migrator = "MIGRATOR")]
    #[ignore = "requires database"]
    async fn failed_batch_rolls_back(pool: PgPool) -> Result<(), DbError> {
        let store = PgQuestionStore::new(pool);
        store.create(id("existing"), "original".into()).await?;

        // PostgreSQL TEXT rejects NUL bytes, failing the second item
        let result = store
            .upsert_batch(vec![
                Question::new(id("existing"), "changed"),
                Question::new(id("bad"), "nul\0byte"),
            ])
            .await;
        assert!(result.is_err());

        assert_eq!(store.get(&id("existing")).await?.text, "original");
        assert!(matches!(
            store.get(&id("bad")).await,
            Err(DbError::NotFound { .. })
        ));
        Ok(())
    }
}
