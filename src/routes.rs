use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::config::session::SessionLayer;
use crate::{auth, handlers, AppState};

/// Profile URL for a user, with the username percent-encoded as a path segment.
pub fn user_path(username: &str) -> String {
    format!("/users/{}", urlencoding::encode(username))
}

pub fn build_router(state: AppState, session_layer: SessionLayer) -> Router {
    // Login and registration forms are only for anonymous visitors
    let guest_routes = Router::new()
        .route(
            "/register",
            get(auth::handlers::register_page).post(auth::handlers::register_handler),
        )
        .route(
            "/login",
            get(auth::handlers::login_page).post(auth::handlers::login_handler),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::middleware::redirect_if_authenticated,
        ));

    Router::new()
        .route("/", get(handlers::index_handler))
        .merge(guest_routes)
        .route("/logout", get(auth::handlers::logout_handler))
        // User routes
        .route("/users/{username}", get(handlers::profile_handler))
        .route(
            "/users/{username}/delete",
            post(handlers::delete_user_handler),
        )
        .route(
            "/users/{username}/feedback/add",
            get(handlers::add_feedback_page).post(handlers::add_feedback_handler),
        )
        // Feedback routes
        .route(
            "/feedback/{id}/update",
            get(handlers::edit_feedback_page).post(handlers::edit_feedback_handler),
        )
        .route(
            "/feedback/{id}/delete",
            post(handlers::delete_feedback_handler),
        )
        .fallback(handlers::not_found_handler)
        // Layers
        .layer(session_layer)
        .layer(middleware::from_fn(crate::middleware::add_security_headers))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
