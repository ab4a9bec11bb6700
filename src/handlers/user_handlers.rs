use crate::auth::AuthContext;
use crate::error::AppError;
use crate::handlers::not_found_page;
use crate::models::{Feedback, User};
use crate::services::user_service::UserServiceError;
use crate::AppState;
use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};

#[derive(Template, WebTemplate)]
#[template(path = "user.html")]
struct ProfileTemplate {
    current_user: Option<String>,
    user: User,
    feedback: Vec<Feedback>,
}

/// GET /users/{username} - Profile page with the user's feedback
pub async fn profile_handler(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(username): Path<String>,
) -> Result<Response, AppError> {
    if let Err(redirect) = auth.authorize(&username, "/login") {
        return Ok(redirect.into_response());
    }

    let Some(user) = state.user_service.find_user(&username).await? else {
        return Ok(not_found_page(&auth));
    };
    let feedback = state.feedback_service.list_for_user(&username).await?;

    let template = ProfileTemplate {
        current_user: Some(user.username.clone()),
        user,
        feedback,
    };

    Ok(Html(template.render()?).into_response())
}

/// POST /users/{username}/delete - Delete the account and its feedback, then log out
pub async fn delete_user_handler(
    State(state): State<AppState>,
    mut auth: AuthContext,
    Path(username): Path<String>,
) -> Result<Response, AppError> {
    if let Err(redirect) = auth.authorize(&username, "/register") {
        return Ok(redirect.into_response());
    }

    match state.user_service.delete_user(&username).await {
        // A stale session for an already removed user is simply cleared.
        Ok(_) | Err(UserServiceError::UserNotFound) => {}
        Err(e) => return Err(e.into()),
    }

    auth.log_out().await?;

    Ok(Redirect::to("/register").into_response())
}
