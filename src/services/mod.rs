pub mod auth_service;
pub mod feedback_service;
pub mod password;
pub mod user_service;

pub use auth_service::AuthService;
pub use feedback_service::FeedbackService;
pub use user_service::UserService;
