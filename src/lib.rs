pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod forms;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

// Make test_utils available for both unit tests and integration tests
pub mod test_utils;

use std::sync::Arc;

use repositories::{SqliteFeedbackRepository, SqliteUserRepository, UserRepository};
use services::{AuthService, FeedbackService, UserService};
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub auth_service: Arc<AuthService>,
    pub feedback_service: Arc<FeedbackService>,
}

impl AppState {
    /// Wires the SQLite repositories into the services.
    pub fn new(pool: SqlitePool) -> Self {
        let user_repository: Arc<dyn UserRepository> =
            Arc::new(SqliteUserRepository::new(pool.clone()));
        let feedback_repository = Arc::new(SqliteFeedbackRepository::new(pool));

        Self {
            user_service: Arc::new(UserService::new(user_repository.clone())),
            auth_service: Arc::new(AuthService::new(user_repository)),
            feedback_service: Arc::new(FeedbackService::new(feedback_repository)),
        }
    }
}
