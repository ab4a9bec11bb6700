pub mod feedback_handlers;
pub mod home_handlers;
pub mod user_handlers;

pub use feedback_handlers::{
    add_feedback_handler, add_feedback_page, delete_feedback_handler, edit_feedback_handler,
    edit_feedback_page,
};
pub use home_handlers::{index_handler, not_found_handler, not_found_page};
pub use user_handlers::{delete_user_handler, profile_handler};
