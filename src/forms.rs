//! Submitted HTML forms and their field rules.
//!
//! Every form deserializes missing fields as empty strings, so an absent
//! field is reported as "required" instead of failing extraction. Validation
//! collects every failing field before returning.

use crate::models::feedback::{Feedback, FeedbackRequest};
use crate::services::{auth_service::LoginRequest, user_service::RegisterRequest};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeMap;

pub const USERNAME_MAX_LEN: usize = 20;
pub const EMAIL_MAX_LEN: usize = 50;
pub const NAME_MAX_LEN: usize = 30;
pub const TITLE_MAX_LEN: usize = 100;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

// Usernames end up as a URL path segment in links and redirects
static USERNAME_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap());

/// Error messages keyed by form field name.
#[derive(Debug, Default, Clone)]
pub struct FieldErrors {
    errors: BTreeMap<&'static str, Vec<String>>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.entry(field).or_default().push(message.into());
    }

    pub fn get(&self, field: &str) -> &[String] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has(&self, field: &str) -> bool {
        !self.get(field).is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Chains field rules and gathers their failures.
pub struct Validator {
    errors: FieldErrors,
}

impl Validator {
    pub fn new() -> Self {
        Self {
            errors: FieldErrors::new(),
        }
    }

    pub fn required(mut self, field: &'static str, value: &str) -> Self {
        if value.trim().is_empty() {
            self.errors.add(field, "This field is required.");
        }
        self
    }

    pub fn max_length(mut self, field: &'static str, value: &str, max: usize) -> Self {
        if value.trim().chars().count() > max {
            self.errors
                .add(field, format!("Field cannot be longer than {} characters.", max));
        }
        self
    }

    /// Skipped for blank values so that only the "required" message shows.
    pub fn email(mut self, field: &'static str, value: &str) -> Self {
        let value = value.trim();
        if !value.is_empty() && !EMAIL_PATTERN.is_match(value) {
            self.errors.add(field, "Invalid email address.");
        }
        self
    }

    /// Restricts usernames to characters that are safe in a path segment.
    pub fn username_chars(mut self, field: &'static str, value: &str) -> Self {
        let value = value.trim();
        if !value.is_empty() && !USERNAME_PATTERN.is_match(value) {
            self.errors.add(
                field,
                "Username may only contain letters, digits, '_' and '-'.",
            );
        }
        self
    }

    pub fn finish(self) -> Result<(), FieldErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegistrationForm {
    pub username: String,
    pub password: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl RegistrationForm {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        Validator::new()
            .required("username", &self.username)
            .max_length("username", &self.username, USERNAME_MAX_LEN)
            .username_chars("username", &self.username)
            .required("password", &self.password)
            .required("email", &self.email)
            .max_length("email", &self.email, EMAIL_MAX_LEN)
            .email("email", &self.email)
            .required("first_name", &self.first_name)
            .max_length("first_name", &self.first_name, NAME_MAX_LEN)
            .required("last_name", &self.last_name)
            .max_length("last_name", &self.last_name, NAME_MAX_LEN)
            .finish()
    }
}

impl From<RegistrationForm> for RegisterRequest {
    fn from(form: RegistrationForm) -> Self {
        RegisterRequest {
            username: form.username.trim().to_string(),
            password: form.password,
            email: form.email.trim().to_string(),
            first_name: form.first_name.trim().to_string(),
            last_name: form.last_name.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        Validator::new()
            .required("username", &self.username)
            .required("password", &self.password)
            .finish()
    }
}

impl From<LoginForm> for LoginRequest {
    fn from(form: LoginForm) -> Self {
        LoginRequest {
            username: form.username.trim().to_string(),
            password: form.password,
        }
    }
}

/// Used by both the add and the edit feedback pages.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FeedbackForm {
    pub title: String,
    pub content: String,
}

impl FeedbackForm {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        Validator::new()
            .required("title", &self.title)
            .max_length("title", &self.title, TITLE_MAX_LEN)
            .required("content", &self.content)
            .finish()
    }
}

impl From<&Feedback> for FeedbackForm {
    fn from(feedback: &Feedback) -> Self {
        FeedbackForm {
            title: feedback.title.clone(),
            content: feedback.content.clone(),
        }
    }
}

impl From<FeedbackForm> for FeedbackRequest {
    fn from(form: FeedbackForm) -> Self {
        FeedbackRequest {
            title: form.title.trim().to_string(),
            content: form.content.trim().to_string(),
        }
    }
}
