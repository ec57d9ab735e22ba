use argon2::{Argon2, password_hash::{PasswordHasher, PasswordVerifier, SaltString}, PasswordHash};
use once_cell::sync::Lazy;
use rand::rngs::OsRng;

use super::errors::AuthError;

pub const ALGORITHM: &str = "argon2";

// 未知账号也要走一次 argon2
static DUMMY_DIGEST: Lazy<Option<String>> = Lazy::new(|| hash("unknown-account-placeholder").ok());

/// Hash `plain` with a fresh random salt; PHC string output.
pub fn hash(plain: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AuthError::HashError(e.to_string()))
}

/// `Ok(false)` on mismatch; `Err` only when the stored digest is unreadable.
pub fn verify(plain: &str, digest: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(digest).map_err(|e| AuthError::HashError(e.to_string()))?;
    Ok(Argon2::default().verify_password(plain.as_bytes(), &parsed).is_ok())
}

/// Spend one verification on a fixed digest. Always `false`.
pub fn verify_dummy(plain: &str) -> bool {
    if let Some(digest) = DUMMY_DIGEST.as_deref() {
        let _ = verify(plain, digest);
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let digest = hash("Passw0rd!").unwrap();
        assert!(digest.starts_with("$argon2"));
        assert!(verify("Passw0rd!", &digest).unwrap());
        assert!(!verify("wrong-pass", &digest).unwrap());
    }

    #[test]
    fn salts_differ() {
        assert_ne!(hash("same-password").unwrap(), hash("same-password").unwrap());
    }

    #[test]
    fn garbage_digest_is_an_error() {
        assert!(matches!(verify("x", "not-a-phc-string"), Err(AuthError::HashError(_))));
    }

    #[test]
    fn dummy_verification_never_matches() {
        assert!(DUMMY_DIGEST.as_deref().is_some_and(|d| d.starts_with("$argon2")));
        assert!(!verify_dummy("unknown-account-placeholder"));
        assert!(!verify_dummy("Passw0rd!"));
    }
}
