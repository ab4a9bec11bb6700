use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Feedback {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub username: String,
}

// Service request models
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackRequest {
    pub title: String,
    pub content: String,
}
