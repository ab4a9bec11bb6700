pub mod feedback;
pub mod user;

pub use feedback::{Feedback, FeedbackRequest};
pub use user::{NewUser, User};
