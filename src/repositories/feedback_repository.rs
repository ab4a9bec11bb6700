use crate::models::feedback::{Feedback, FeedbackRequest};
use crate::repositories::user_repository::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use sqlx::SqlitePool;

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait FeedbackRepository: Send + Sync {
    async fn create(&self, username: &str, request: &FeedbackRequest) -> RepositoryResult<Feedback>;
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Feedback>>;
    async fn list_by_username(&self, username: &str) -> RepositoryResult<Vec<Feedback>>;
    async fn update(&self, id: i64, request: &FeedbackRequest) -> RepositoryResult<bool>;
    async fn delete(&self, id: i64) -> RepositoryResult<bool>;
}

pub struct SqliteFeedbackRepository {
    pool: SqlitePool,
}

impl SqliteFeedbackRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FeedbackRepository for SqliteFeedbackRepository {
    async fn create(&self, username: &str, request: &FeedbackRequest) -> RepositoryResult<Feedback> {
        let result = sqlx::query(
            r#"
            INSERT INTO feedback (title, content, username)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(&request.title)
        .bind(&request.content)
        .bind(username)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.find_by_id(id).await?.ok_or(RepositoryError::NotFound)
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Feedback>> {
        let feedback = sqlx::query_as::<_, Feedback>(
            "SELECT id, title, content, username FROM feedback WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(feedback)
    }

    async fn list_by_username(&self, username: &str) -> RepositoryResult<Vec<Feedback>> {
        let rows = sqlx::query_as::<_, Feedback>(
            r#"
            SELECT id, title, content, username
            FROM feedback
            WHERE username = ?
            ORDER BY id ASC
            "#,
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn update(&self, id: i64, request: &FeedbackRequest) -> RepositoryResult<bool> {
        let result = sqlx::query("UPDATE feedback SET title = ?, content = ? WHERE id = ?")
            .bind(&request.title)
            .bind(&request.content)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM feedback WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
