pub mod feedback_repository;
pub mod user_repository;

pub use feedback_repository::{FeedbackRepository, SqliteFeedbackRepository};
pub use user_repository::{RepositoryError, SqliteUserRepository, UserRepository};
