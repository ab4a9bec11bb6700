use crate::auth::AuthContext;
use crate::error::AppError;
use crate::models::User;
use askama::Template;
use askama_web::WebTemplate;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use tracing::warn;

#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
struct IndexTemplate {
    current_user: Option<String>,
    user: Option<User>,
}

#[derive(Template, WebTemplate)]
#[template(path = "404.html")]
struct NotFoundTemplate {
    current_user: Option<String>,
}

/// GET / - Home page, personalized when a user is logged in
pub async fn index_handler(auth: AuthContext) -> impl IntoResponse {
    IndexTemplate {
        current_user: auth.username().map(str::to_string),
        user: auth.user().cloned(),
    }
}

/// Renders the 404 page, with the navigation of the logged-in user if any.
pub fn not_found_page(auth: &AuthContext) -> Response {
    let current_user = auth.username().map(str::to_string);

    match (NotFoundTemplate { current_user }).render() {
        Ok(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
        Err(e) => {
            warn!(error = %e, "Failed to render 404 page");
            AppError::NotFound.into_response()
        }
    }
}

/// Router fallback
pub async fn not_found_handler(auth: AuthContext) -> Response {
    not_found_page(&auth)
}
