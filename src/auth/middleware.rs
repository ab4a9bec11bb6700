use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::auth::AuthContext;
use crate::routes::user_path;

/// Sends visitors who are already logged in to their profile instead of the
/// login or registration form. Stale sessions were already cleared by the
/// extractor, so their holders see the form.
pub async fn redirect_if_authenticated(auth: AuthContext, request: Request, next: Next) -> Response {
    match auth.username() {
        Some(username) => Redirect::to(&user_path(username)).into_response(),
        None => next.run(request).await,
    }
}
