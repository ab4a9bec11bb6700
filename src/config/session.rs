use std::env;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use sha2::{Digest, Sha512};
use time::Duration;
use tower_sessions::{
    cookie::{Key, SameSite},
    service::SignedCookie,
    Expiry, SessionManagerLayer,
};
use tower_sessions_sqlx_store::SqliteStore;
use tracing::warn;

use super::ConfigError;

/// Convenience alias for the signed session layer produced by `SessionConfig`.
pub type SessionLayer = SessionManagerLayer<SqliteStore, SignedCookie>;

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSite,
    pub expiry: Duration,
    pub name: String,
}

impl SessionConfig {
    pub fn from_env() -> Self {
        if is_production() {
            SessionConfig {
                secure: true,
                http_only: true,
                same_site: SameSite::Strict,
                expiry: Duration::hours(2),
                name: "__Host-session".to_string(),
            }
        } else {
            SessionConfig {
                secure: false,
                http_only: true,
                same_site: SameSite::Lax,
                expiry: Duration::days(7),
                name: "session".to_string(),
            }
        }
    }

    /// Builds the signed cookie layer. The signing key comes from
    /// `SESSION_SECRET`; without one every restart invalidates old cookies.
    pub fn create_layer(&self, store: SqliteStore) -> SessionLayer {
        SessionManagerLayer::new(store)
            .with_name(self.name.clone())
            .with_expiry(Expiry::OnInactivity(self.expiry))
            .with_same_site(self.same_site)
            .with_http_only(self.http_only)
            .with_secure(self.secure)
            .with_signed(signing_key())
    }
}

/// Refuses to start a production deployment without HTTPS or with a weak
/// session secret. Always passes outside production.
pub fn validate_production_config() -> Result<(), ConfigError> {
    if !is_production() {
        return Ok(());
    }

    if !env_flag_enabled("FORCE_HTTPS") {
        return Err(ConfigError::HttpsRequired);
    }

    let secret = env::var("SESSION_SECRET").map_err(|_| ConfigError::Missing("SESSION_SECRET"))?;

    if decode_secret_bytes(&secret).len() < 64 {
        return Err(ConfigError::SecretTooShort);
    }

    let lowered = secret.to_ascii_lowercase();
    if lowered.contains("example") || lowered.contains("changeme") || lowered.contains("default") {
        return Err(ConfigError::SecretIsDefault);
    }

    Ok(())
}

pub fn is_production() -> bool {
    env::var("ENVIRONMENT")
        .map(|value| value == "production")
        .unwrap_or(false)
}

fn env_flag_enabled(key: &str) -> bool {
    env::var(key)
        .map(|value| matches!(value.as_str(), "1" | "true" | "TRUE" | "True"))
        .unwrap_or(false)
}

fn signing_key() -> Key {
    let secret = env::var("SESSION_SECRET").ok().filter(|secret| !secret.is_empty());

    match secret {
        Some(secret) => derive_key(&decode_secret_bytes(&secret)),
        None => {
            warn!("SESSION_SECRET is not set, signing sessions with a throwaway key");
            Key::generate()
        }
    }
}

/// Accepts the secret either base64 encoded or as raw text.
fn decode_secret_bytes(secret: &str) -> Vec<u8> {
    STANDARD.decode(secret).unwrap_or_else(|_| secret.into())
}

// Key::from needs 64 bytes of key material; shorter secrets are stretched.
fn derive_key(material: &[u8]) -> Key {
    match material.get(..64) {
        Some(master) => Key::from(master),
        None => Key::from(Sha512::digest(material).as_slice()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_decoding_accepts_base64_and_raw_text() {
        assert_eq!(decode_secret_bytes("aGVsbG8="), b"hello".to_vec());
        assert_eq!(decode_secret_bytes("not base64!"), b"not base64!".to_vec());
    }

    #[test]
    fn test_derived_key_is_stable_for_short_and_long_material() {
        let short = b"short secret";
        assert_eq!(derive_key(short).master(), derive_key(short).master());

        let long = [7u8; 80];
        assert_eq!(derive_key(&long).master(), &long[..64]);
    }
}
