pub mod test_helpers {
    use crate::config::session::{SessionConfig, SessionLayer};
    use crate::services::password::hash_password;
    use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
    use tempfile::NamedTempFile;
    use tower_sessions_sqlx_store::SqliteStore;

    /// Create a new in-memory SQLite database for testing
    pub async fn create_test_db() -> Result<SqlitePool, sqlx::Error> {
        // A single connection that never idles out keeps the in-memory database alive
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        // Run migrations
        crate::db::migrate(&pool).await?;

        Ok(pool)
    }

    /// Create a temporary file-based SQLite database for testing
    /// Useful when you need to test features that don't work with in-memory databases
    pub async fn create_test_db_file() -> Result<(SqlitePool, NamedTempFile), sqlx::Error> {
        let temp_file = NamedTempFile::new().map_err(sqlx::Error::Io)?;
        let db_path = temp_file
            .path()
            .to_str()
            .ok_or_else(|| sqlx::Error::Configuration("Invalid database path".into()))?;
        let database_url = format!("sqlite://{}", db_path);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(&database_url)
            .await?;

        // Run migrations
        crate::db::migrate(&pool).await?;

        Ok((pool, temp_file))
    }

    /// Session layer backed by the given pool, using the development cookie settings
    pub async fn create_test_session_layer(pool: &SqlitePool) -> Result<SessionLayer, sqlx::Error> {
        let session_store = SqliteStore::new(pool.clone())
            .with_table_name("sessions")
            .map_err(|e| sqlx::Error::Configuration(e.into()))?;
        session_store.migrate().await?;

        Ok(SessionConfig::from_env().create_layer(session_store))
    }

    /// Insert a test user with hashed password
    pub async fn insert_test_user(
        pool: &SqlitePool,
        username: &str,
        password: &str,
    ) -> Result<(), sqlx::Error> {
        let password_hash = hash_password(password).map_err(|e| {
            sqlx::Error::Configuration(format!("Password hashing failed: {}", e).into())
        })?;

        sqlx::query(
            r#"
            INSERT INTO users (username, password_hash, email, first_name, last_name)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(format!("{}@example.com", username))
        .bind("Test")
        .bind("User")
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Create a test feedback row owned by `username`
    pub async fn insert_test_feedback(
        pool: &SqlitePool,
        username: &str,
        title: &str,
        content: &str,
    ) -> Result<i64, sqlx::Error> {
        let result = sqlx::query("INSERT INTO feedback (title, content, username) VALUES (?, ?, ?)")
            .bind(title)
            .bind(content)
            .bind(username)
            .execute(pool)
            .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn count_feedback(pool: &SqlitePool, username: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM feedback WHERE username = ?")
            .bind(username)
            .fetch_one(pool)
            .await
    }
}
