use crate::models::user::{NewUser, User};
use crate::repositories::user_repository::{RepositoryError, UserRepository};
use crate::services::password;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum UserServiceError {
    #[error("User not found")]
    UserNotFound,
    #[error("Username already taken")]
    UsernameTaken,
    #[error("Email already registered")]
    EmailTaken,
    #[error("Password hashing failed: {0}")]
    HashingError(String),
    #[error("Repository error: {0}")]
    RepositoryError(#[from] RepositoryError),
}

pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    pub async fn register(&self, request: RegisterRequest) -> Result<User, UserServiceError> {
        let password_hash = password::hash_password(&request.password)
            .map_err(|e| UserServiceError::HashingError(e.to_string()))?;

        let new_user = NewUser {
            username: request.username,
            password_hash,
            email: request.email,
            first_name: request.first_name,
            last_name: request.last_name,
        };

        match self.repository.create_user(&new_user).await {
            Ok(user) => {
                info!(username = %user.username, "Registered new user");
                Ok(user)
            }
            Err(RepositoryError::AlreadyExists("email")) => Err(UserServiceError::EmailTaken),
            Err(RepositoryError::AlreadyExists(_)) => Err(UserServiceError::UsernameTaken),
            Err(e) => Err(UserServiceError::RepositoryError(e)),
        }
    }

    pub async fn find_user(&self, username: &str) -> Result<Option<User>, UserServiceError> {
        Ok(self.repository.find_by_username(username).await?)
    }

    /// Removes the account together with all of its feedback.
    pub async fn delete_user(&self, username: &str) -> Result<u64, UserServiceError> {
        match self.repository.delete_user(username).await {
            Ok(removed_feedback) => {
                info!(%username, removed_feedback, "Deleted user");
                Ok(removed_feedback)
            }
            Err(RepositoryError::NotFound) => Err(UserServiceError::UserNotFound),
            Err(e) => Err(UserServiceError::RepositoryError(e)),
        }
    }
}
