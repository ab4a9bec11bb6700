use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, SaltString},
    Argon2, PasswordVerifier,
};

/// Hashes a plaintext password with argon2id and a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
}

/// Returns false for a mismatch and for a hash that does not parse.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    if let Ok(parsed_hash) = PasswordHash::new(password_hash) {
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_salted() {
        let first = hash_password("pw123").expect("hashing to succeed");
        let second = hash_password("pw123").expect("hashing to succeed");

        assert_ne!(first, second);
        assert!(first.starts_with("$argon2"));
        assert!(verify_password("pw123", &first));
        assert!(verify_password("pw123", &second));
    }

    #[test]
    fn test_verify_rejects_wrong_password_and_garbage_hash() {
        let hash = hash_password("correct").expect("hashing to succeed");

        assert!(!verify_password("wrong", &hash));
        assert!(!verify_password("correct", "not-a-hash"));
    }
}
