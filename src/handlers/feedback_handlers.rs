use crate::auth::AuthContext;
use crate::error::AppError;
use crate::forms::{FeedbackForm, FieldErrors};
use crate::handlers::not_found_page;
use crate::models::Feedback;
use crate::routes::user_path;
use crate::services::feedback_service::FeedbackServiceError;
use crate::AppState;
use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};

// Template structures
#[derive(Template, WebTemplate)]
#[template(path = "feedback/add.html")]
struct AddFeedbackTemplate {
    current_user: Option<String>,
    username: String,
    form: FeedbackForm,
    errors: FieldErrors,
}

#[derive(Template, WebTemplate)]
#[template(path = "feedback/edit.html")]
struct EditFeedbackTemplate {
    current_user: Option<String>,
    feedback_id: i64,
    form: FeedbackForm,
    errors: FieldErrors,
}

/// Loads a feedback row, answering with the 404 page when the id is not a
/// number or no such row exists.
async fn find_feedback(
    state: &AppState,
    auth: &AuthContext,
    raw_id: &str,
) -> Result<Feedback, Response> {
    let Ok(id) = raw_id.parse::<i64>() else {
        return Err(not_found_page(auth));
    };

    match state.feedback_service.get(id).await {
        Ok(feedback) => Ok(feedback),
        Err(FeedbackServiceError::NotFound) => Err(not_found_page(auth)),
        Err(e) => Err(AppError::from(e).into_response()),
    }
}

// Handlers

/// GET /users/{username}/feedback/add - Display the new feedback form
pub async fn add_feedback_page(
    auth: AuthContext,
    Path(username): Path<String>,
) -> Result<Response, AppError> {
    if let Err(redirect) = auth.authorize(&username, "/login") {
        return Ok(redirect.into_response());
    }

    let template = AddFeedbackTemplate {
        current_user: Some(username.clone()),
        username,
        form: FeedbackForm::default(),
        errors: FieldErrors::new(),
    };

    Ok(Html(template.render()?).into_response())
}

/// POST /users/{username}/feedback/add - Create feedback owned by the session user
pub async fn add_feedback_handler(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(username): Path<String>,
    Form(form): Form<FeedbackForm>,
) -> Result<Response, AppError> {
    if let Err(redirect) = auth.authorize(&username, "/login") {
        return Ok(redirect.into_response());
    }

    if let Err(errors) = form.validate() {
        let template = AddFeedbackTemplate {
            current_user: Some(username.clone()),
            username,
            form,
            errors,
        };
        return Ok(Html(template.render()?).into_response());
    }

    state
        .feedback_service
        .create(&username, form.into())
        .await?;

    Ok(Redirect::to(&user_path(&username)).into_response())
}

/// GET /feedback/{id}/update - Display the edit form
pub async fn edit_feedback_page(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let feedback = match find_feedback(&state, &auth, &id).await {
        Ok(feedback) => feedback,
        Err(response) => return Ok(response),
    };

    if let Err(redirect) = auth.authorize(&feedback.username, "/login") {
        return Ok(redirect.into_response());
    }

    let template = EditFeedbackTemplate {
        current_user: Some(feedback.username.clone()),
        feedback_id: feedback.id,
        form: FeedbackForm::from(&feedback),
        errors: FieldErrors::new(),
    };

    Ok(Html(template.render()?).into_response())
}

/// POST /feedback/{id}/update - Overwrite title and content
pub async fn edit_feedback_handler(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<String>,
    Form(form): Form<FeedbackForm>,
) -> Result<Response, AppError> {
    let feedback = match find_feedback(&state, &auth, &id).await {
        Ok(feedback) => feedback,
        Err(response) => return Ok(response),
    };

    if let Err(redirect) = auth.authorize(&feedback.username, "/login") {
        return Ok(redirect.into_response());
    }

    if let Err(errors) = form.validate() {
        let template = EditFeedbackTemplate {
            current_user: Some(feedback.username.clone()),
            feedback_id: feedback.id,
            form,
            errors,
        };
        return Ok(Html(template.render()?).into_response());
    }

    let updated = state.feedback_service.update(feedback.id, form.into()).await?;

    Ok(Redirect::to(&user_path(&updated.username)).into_response())
}

/// POST /feedback/{id}/delete - Delete feedback owned by the session user
pub async fn delete_feedback_handler(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let feedback = match find_feedback(&state, &auth, &id).await {
        Ok(feedback) => feedback,
        Err(response) => return Ok(response),
    };

    if let Err(redirect) = auth.authorize(&feedback.username, "/register") {
        return Ok(redirect.into_response());
    }

    state.feedback_service.delete(feedback.id).await?;

    Ok(Redirect::to(&user_path(&feedback.username)).into_response())
}
