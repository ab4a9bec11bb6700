use feedback_board::{
    models::FeedbackRequest,
    repositories::{SqliteFeedbackRepository, SqliteUserRepository},
    services::{
        feedback_service::FeedbackService,
        user_service::{RegisterRequest, UserService, UserServiceError},
    },
    test_utils::test_helpers,
};
use std::sync::Arc;

fn register_request(username: &str, email: &str) -> RegisterRequest {
    RegisterRequest {
        username: username.to_string(),
        password: "pw123".to_string(),
        email: email.to_string(),
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
    }
}

async fn count_users(pool: &sqlx::SqlitePool, username: &str) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE username = ?")
        .bind(username)
        .fetch_one(pool)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_register_success() {
    // Create isolated test database
    let pool = test_helpers::create_test_db().await.unwrap();
    let repository = Arc::new(SqliteUserRepository::new(pool));
    let service = UserService::new(repository);

    let user = service
        .register(register_request("bob", "bob@example.com"))
        .await
        .unwrap();

    assert_eq!(user.username, "bob");
    assert_eq!(user.email, "bob@example.com");
    assert_ne!(user.password_hash, "pw123");
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let repository = Arc::new(SqliteUserRepository::new(pool.clone()));
    let service = UserService::new(repository);

    service
        .register(register_request("bob", "bob@example.com"))
        .await
        .unwrap();

    // Same username, different email
    let result = service
        .register(register_request("bob", "other@example.com"))
        .await;
    assert!(matches!(result, Err(UserServiceError::UsernameTaken)));

    assert_eq!(count_users(&pool, "bob").await, 1);
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let repository = Arc::new(SqliteUserRepository::new(pool.clone()));
    let service = UserService::new(repository);

    service
        .register(register_request("bob", "shared@example.com"))
        .await
        .unwrap();

    let result = service
        .register(register_request("carol", "shared@example.com"))
        .await;
    assert!(matches!(result, Err(UserServiceError::EmailTaken)));

    assert_eq!(count_users(&pool, "carol").await, 0);
}

#[tokio::test]
async fn test_delete_user_cascades_to_feedback() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let user_service = UserService::new(Arc::new(SqliteUserRepository::new(pool.clone())));
    let feedback_service = FeedbackService::new(Arc::new(SqliteFeedbackRepository::new(pool.clone())));

    user_service
        .register(register_request("bob", "bob@example.com"))
        .await
        .unwrap();
    user_service
        .register(register_request("alice", "alice@example.com"))
        .await
        .unwrap();

    for title in ["First", "Second"] {
        feedback_service
            .create(
                "bob",
                FeedbackRequest {
                    title: title.to_string(),
                    content: "Nice work".to_string(),
                },
            )
            .await
            .unwrap();
    }
    feedback_service
        .create(
            "alice",
            FeedbackRequest {
                title: "Untouched".to_string(),
                content: "Stays".to_string(),
            },
        )
        .await
        .unwrap();

    let removed = user_service.delete_user("bob").await.unwrap();
    assert_eq!(removed, 2);

    // Verify user and their feedback are gone, other users are untouched
    assert!(user_service.find_user("bob").await.unwrap().is_none());
    assert!(feedback_service.list_for_user("bob").await.unwrap().is_empty());
    assert_eq!(feedback_service.list_for_user("alice").await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete_nonexistent_user() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let repository = Arc::new(SqliteUserRepository::new(pool));
    let service = UserService::new(repository);

    let result = service.delete_user("ghost").await;
    assert!(matches!(result, Err(UserServiceError::UserNotFound)));
}

#[tokio::test]
async fn test_data_survives_on_file_database() {
    let (pool, _file) = test_helpers::create_test_db_file().await.unwrap();
    let repository = Arc::new(SqliteUserRepository::new(pool));
    let service = UserService::new(repository);

    service
        .register(register_request("dora", "dora@example.com"))
        .await
        .unwrap();

    let found = service.find_user("dora").await.unwrap().unwrap();
    assert_eq!(found.full_name(), "Test User");
}
