use crate::models::user::User;
use crate::repositories::user_repository::UserRepository;
use crate::services::password;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum AuthServiceError {
    /// Covers both an unknown username and a wrong password.
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Repository error: {0}")]
    RepositoryError(#[from] crate::repositories::user_repository::RepositoryError),
}

pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

pub struct AuthService {
    user_repository: Arc<dyn UserRepository>,
}

impl AuthService {
    pub fn new(user_repository: Arc<dyn UserRepository>) -> Self {
        Self { user_repository }
    }

    pub async fn authenticate(&self, request: LoginRequest) -> Result<User, AuthServiceError> {
        let Some(user) = self
            .user_repository
            .find_by_username(&request.username)
            .await?
        else {
            debug!(username = %request.username, "Login for unknown user");
            return Err(AuthServiceError::InvalidCredentials);
        };

        if !password::verify_password(&request.password, &user.password_hash) {
            debug!(username = %request.username, "Login with wrong password");
            return Err(AuthServiceError::InvalidCredentials);
        }

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::user_repository::MockUserRepository;
    use mockall::predicate::*;

    fn alice() -> User {
        User {
            username: "alice".to_string(),
            password_hash: password::hash_password("correct").expect("hashing to succeed"),
            email: "alice@example.com".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Liddell".to_string(),
        }
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let mut mock_repo = MockUserRepository::new();
        let user = alice();

        mock_repo
            .expect_find_by_username()
            .with(eq("alice"))
            .times(1)
            .returning(move |_| {
                let user = user.clone();
                Box::pin(async move { Ok(Some(user)) })
            });

        let service = AuthService::new(Arc::new(mock_repo));

        let request = LoginRequest {
            username: "alice".to_string(),
            password: "correct".to_string(),
        };

        let user = service.authenticate(request).await.expect("Expected Ok result");
        assert_eq!(user.username, "alice");
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password() {
        let mut mock_repo = MockUserRepository::new();
        let user = alice();

        mock_repo
            .expect_find_by_username()
            .with(eq("alice"))
            .times(1)
            .returning(move |_| {
                let user = user.clone();
                Box::pin(async move { Ok(Some(user)) })
            });

        let service = AuthService::new(Arc::new(mock_repo));

        let request = LoginRequest {
            username: "alice".to_string(),
            password: "wrong".to_string(),
        };

        let result = service.authenticate(request).await;
        assert!(matches!(result, Err(AuthServiceError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_authenticate_unknown_user() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_find_by_username()
            .with(eq("nobody"))
            .times(1)
            .returning(|_| Box::pin(async move { Ok(None) }));

        let service = AuthService::new(Arc::new(mock_repo));

        let request = LoginRequest {
            username: "nobody".to_string(),
            password: "x".to_string(),
        };

        let result = service.authenticate(request).await;
        assert!(matches!(result, Err(AuthServiceError::InvalidCredentials)));
    }
}
