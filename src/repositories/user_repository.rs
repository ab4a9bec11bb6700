use crate::models::user::{NewUser, User};
use async_trait::async_trait;
use sqlx::SqlitePool;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Record not found")]
    NotFound,
    /// A unique column rejected the insert; carries the column name.
    #[error("{0} already exists")]
    AlreadyExists(&'static str),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, user: &NewUser) -> RepositoryResult<User>;
    async fn find_by_username(&self, username: &str) -> RepositoryResult<Option<User>>;
    /// Deletes the user and every feedback row they own in one transaction.
    /// Returns the number of feedback rows removed.
    async fn delete_user(&self, username: &str) -> RepositoryResult<u64>;
}

pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn map_unique_violation(err: sqlx::Error) -> RepositoryError {
    match &err {
        sqlx::Error::Database(db_err)
            if db_err.is_unique_violation() || db_err.message().contains("UNIQUE") =>
        {
            if db_err.message().contains("users.email") {
                RepositoryError::AlreadyExists("email")
            } else {
                RepositoryError::AlreadyExists("username")
            }
        }
        _ => RepositoryError::Database(err),
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn create_user(&self, user: &NewUser) -> RepositoryResult<User> {
        sqlx::query(
            r#"
            INSERT INTO users (username, password_hash, email, first_name, last_name)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(&user.email)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .execute(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        self.find_by_username(&user.username)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    async fn find_by_username(&self, username: &str) -> RepositoryResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT username, password_hash, email, first_name, last_name
            FROM users
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn delete_user(&self, username: &str) -> RepositoryResult<u64> {
        let mut tx = self.pool.begin().await?;

        let feedback = sqlx::query("DELETE FROM feedback WHERE username = ?")
            .bind(username)
            .execute(&mut *tx)
            .await?;

        let user = sqlx::query("DELETE FROM users WHERE username = ?")
            .bind(username)
            .execute(&mut *tx)
            .await?;

        if user.rows_affected() == 0 {
            // Dropping the transaction rolls back the feedback delete.
            return Err(RepositoryError::NotFound);
        }

        tx.commit().await?;

        Ok(feedback.rows_affected())
    }
}
