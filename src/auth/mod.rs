pub mod context;
pub mod handlers;
pub mod middleware;

pub use context::{AuthContext, SESSION_USER_KEY};
