use axum::{extract::FromRequestParts, http::request::Parts, response::Redirect};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use sha2::{Digest, Sha256};
use tower_sessions::{session, Session};
use tracing::warn;

use crate::error::AppError;
use crate::models::User;
use crate::AppState;

/// Session key holding the authenticated username.
pub const SESSION_USER_KEY: &str = "username";

/// Session key holding a fingerprint of the user's password hash. A session
/// only stays valid while it matches the stored user row, so it dies with
/// an account deletion even if the username is registered again later.
pub const SESSION_FINGERPRINT_KEY: &str = "user_fingerprint";

/// The authenticated user of the current request, resolved once from the
/// session and handed to handlers explicitly.
#[derive(Clone)]
pub struct AuthContext {
    session: Session,
    user: Option<User>,
}

impl AuthContext {
    /// Resolves the session user against the database. Sessions naming a user
    /// that no longer exists (or was re-created) are cleared and treated as
    /// anonymous.
    pub async fn load(session: Session, state: &AppState) -> Result<Self, AppError> {
        let Some(username) = session.get::<String>(SESSION_USER_KEY).await? else {
            return Ok(Self {
                session,
                user: None,
            });
        };
        let fingerprint = session.get::<String>(SESSION_FINGERPRINT_KEY).await?;

        let user = state
            .user_service
            .find_user(&username)
            .await?
            .filter(|user| fingerprint.as_deref() == Some(user_fingerprint(user).as_str()));

        let mut context = Self { session, user };
        if context.user.is_none() {
            warn!(username = %username, "Discarding session for a missing user");
            context.clear().await?;
        }

        Ok(context)
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn username(&self) -> Option<&str> {
        self.user.as_ref().map(|user| user.username.as_str())
    }

    /// Lets the request through only when the session user owns the
    /// resource; otherwise redirects to `fallback`.
    pub fn authorize(&self, owner: &str, fallback: &'static str) -> Result<&str, Redirect> {
        match self.username() {
            Some(current) if is_owner(Some(current), owner) => Ok(current),
            _ => Err(Redirect::to(fallback)),
        }
    }

    pub async fn log_in(&mut self, user: User) -> Result<(), session::Error> {
        self.session
            .insert(SESSION_USER_KEY, user.username.clone())
            .await?;
        self.session
            .insert(SESSION_FINGERPRINT_KEY, user_fingerprint(&user))
            .await?;
        self.user = Some(user);
        Ok(())
    }

    /// Clears the whole session; a no-op for anonymous visitors.
    pub async fn log_out(&mut self) -> Result<(), session::Error> {
        self.session.flush().await?;
        self.user = None;
        Ok(())
    }

    // Keeps the session itself usable so a later log_in can reuse it.
    async fn clear(&mut self) -> Result<(), session::Error> {
        self.session.remove_value(SESSION_USER_KEY).await?;
        self.session.remove_value(SESSION_FINGERPRINT_KEY).await?;
        self.user = None;
        Ok(())
    }
}

pub fn is_owner(current: Option<&str>, owner: &str) -> bool {
    matches!(current, Some(current) if current == owner)
}

/// Changes whenever the user row is re-created, since every password hash
/// carries a fresh salt.
pub fn user_fingerprint(user: &User) -> String {
    STANDARD.encode(Sha256::digest(user.password_hash.as_bytes()))
}

impl FromRequestParts<AppState> for AuthContext {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, msg)| AppError::Internal(msg.to_string()))?;

        AuthContext::load(session, state).await
    }
}
