use crate::auth::AuthContext;
use crate::error::AppError;
use crate::forms::{FieldErrors, LoginForm, RegistrationForm};
use crate::routes::user_path;
use crate::services::{auth_service::AuthServiceError, user_service::UserServiceError};
use crate::AppState;
use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Form, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use tracing::info;

#[derive(Template, WebTemplate)]
#[template(path = "register.html")]
struct RegisterTemplate {
    current_user: Option<String>,
    form: RegistrationForm,
    errors: FieldErrors,
}

#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
struct LoginTemplate {
    current_user: Option<String>,
    form: LoginForm,
    errors: FieldErrors,
}

pub async fn register_page() -> impl IntoResponse {
    RegisterTemplate {
        current_user: None,
        form: RegistrationForm::default(),
        errors: FieldErrors::new(),
    }
}

fn register_error(form: RegistrationForm, errors: FieldErrors) -> Result<Response, AppError> {
    let template = RegisterTemplate {
        current_user: None,
        form: RegistrationForm {
            password: String::new(),
            ..form
        },
        errors,
    };
    Ok(Html(template.render()?).into_response())
}

pub async fn register_handler(
    State(app_state): State<AppState>,
    mut auth: AuthContext,
    Form(form): Form<RegistrationForm>,
) -> Result<Response, AppError> {
    if let Err(errors) = form.validate() {
        return register_error(form, errors);
    }

    match app_state.user_service.register(form.clone().into()).await {
        Ok(user) => {
            let location = user_path(&user.username);
            auth.log_in(user).await?;
            Ok(Redirect::to(&location).into_response())
        }
        Err(err) => {
            let mut errors = FieldErrors::new();
            match err {
                UserServiceError::UsernameTaken => {
                    errors.add("username", "That username is already taken")
                }
                UserServiceError::EmailTaken => {
                    errors.add("email", "That email is already registered")
                }
                other => return Err(other.into()),
            }
            register_error(form, errors)
        }
    }
}

pub async fn login_page() -> impl IntoResponse {
    LoginTemplate {
        current_user: None,
        form: LoginForm::default(),
        errors: FieldErrors::new(),
    }
}

fn login_error(form: LoginForm, errors: FieldErrors) -> Result<Response, AppError> {
    let template = LoginTemplate {
        current_user: None,
        form: LoginForm {
            password: String::new(),
            ..form
        },
        errors,
    };
    Ok(Html(template.render()?).into_response())
}

pub async fn login_handler(
    State(app_state): State<AppState>,
    mut auth: AuthContext,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    if let Err(errors) = form.validate() {
        return login_error(form, errors);
    }

    match app_state.auth_service.authenticate(form.clone().into()).await {
        Ok(user) => {
            info!(username = %user.username, "User logged in");
            let location = user_path(&user.username);
            auth.log_in(user).await?;
            Ok(Redirect::to(&location).into_response())
        }
        Err(AuthServiceError::InvalidCredentials) => {
            let mut errors = FieldErrors::new();
            errors.add("username", "Invalid username/password");
            login_error(form, errors)
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn logout_handler(mut auth: AuthContext) -> Result<Redirect, AppError> {
    auth.log_out().await?;
    Ok(Redirect::to("/login"))
}
