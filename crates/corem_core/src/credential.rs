//! Salted password digest derivation and verification.
//!
//! # Responsibility
//! - Derive a deterministic, salt-dependent one-way digest from a secret.
//! - Generate fresh per-account salts.
//! - Hold the transient plaintext key of a live session without exposing it.
//!
//! # Invariants
//! - `digest(s, a)` is stable for the same `(s, a)` pair.
//! - Distinct salts produce distinct digests for the same secret.
//! - `SessionKey` is never serialized and never printed by `Debug`.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use uuid::Uuid;

/// Argon2 rejects salts shorter than eight bytes.
const MIN_SALT_BYTES: usize = 8;

/// Errors raised while deriving a digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    /// Salt is empty, too short or too long for the hashing primitive.
    InvalidSalt(String),
    /// The hashing backend rejected the input.
    Hash(String),
    /// A stored digest is not a parseable PHC string.
    MalformedDigest(String),
}

impl Display for CredentialError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSalt(details) => write!(f, "invalid salt: {details}"),
            Self::Hash(details) => write!(f, "password hashing failed: {details}"),
            Self::MalformedDigest(details) => write!(f, "stored digest is malformed: {details}"),
        }
    }
}

impl Error for CredentialError {}

/// Derives the Argon2id digest of `secret` under `salt`.
///
/// The returned value is a PHC string (`$argon2id$v=19$...`) that embeds the
/// salt and parameters, so it can be stored as-is.
///
/// # Errors
/// - `InvalidSalt` when `salt` is shorter than eight bytes or cannot be
///   encoded as an Argon2 salt.
/// - `Hash` when the Argon2 backend fails.
pub fn digest(secret: &str, salt: &str) -> Result<String, CredentialError> {
    let salt = encode_salt(salt)?;
    Argon2::default()
        .hash_password(secret.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| CredentialError::Hash(err.to_string()))
}

/// Returns a fresh 128-bit random salt encoded as hyphenated UUID text.
pub fn generate_salt() -> String {
    Uuid::new_v4().to_string()
}

/// Checks `secret` against `stored_digest` derived under `salt`.
///
/// A stored digest whose embedded salt is not `salt` never matches.
///
/// # Errors
/// - `InvalidSalt` as for [`digest`].
/// - `MalformedDigest` when `stored_digest` is not a PHC string.
pub fn verify(secret: &str, salt: &str, stored_digest: &str) -> Result<bool, CredentialError> {
    let expected_salt = encode_salt(salt)?;
    let parsed = PasswordHash::new(stored_digest)
        .map_err(|err| CredentialError::MalformedDigest(err.to_string()))?;
    match parsed.salt {
        Some(embedded) if embedded.as_str() == expected_salt.as_str() => {}
        _ => return Ok(false),
    }

    Ok(Argon2::default()
        .verify_password(secret.as_bytes(), &parsed)
        .is_ok())
}

fn encode_salt(salt: &str) -> Result<SaltString, CredentialError> {
    if salt.len() < MIN_SALT_BYTES {
        return Err(CredentialError::InvalidSalt(format!(
            "salt must be at least {MIN_SALT_BYTES} bytes, got {}",
            salt.len()
        )));
    }
    SaltString::encode_b64(salt.as_bytes())
        .map_err(|err| CredentialError::InvalidSalt(err.to_string()))
}

/// Plaintext key entered by the user for the current session.
///
/// Lives only in memory next to the account it unlocked.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionKey(String);

impl SessionKey {
    pub fn new(plaintext: impl Into<String>) -> Self {
        Self(plaintext.into())
    }

    /// Borrows the plaintext. Callers must not persist or log it.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl Debug for SessionKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionKey(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::{digest, generate_salt, verify, CredentialError, SessionKey};
    use std::collections::HashSet;

    #[test]
    fn digest_is_deterministic_for_same_salt() {
        let salt = generate_salt();
        let first = digest("Secr3t!", &salt).unwrap();
        let second = digest("Secr3t!", &salt).unwrap();
        assert_eq!(first, second);
        assert!(first.starts_with("$argon2id$"));
    }

    #[test]
    fn digest_changes_with_salt_and_secret() {
        let salt_a = generate_salt();
        let salt_b = generate_salt();
        let base = digest("Secr3t!", &salt_a).unwrap();
        assert_ne!(base, digest("Secr3t!", &salt_b).unwrap());
        assert_ne!(base, digest("secr3t!", &salt_a).unwrap());
    }

    #[test]
    fn digest_does_not_contain_plaintext() {
        let salt = generate_salt();
        let hashed = digest("plain-text-visible", &salt).unwrap();
        assert!(!hashed.contains("plain-text-visible"));
    }

    #[test]
    fn short_salt_is_rejected() {
        let err = digest("secret", "abc").unwrap_err();
        assert!(matches!(err, CredentialError::InvalidSalt(_)));
    }

    #[test]
    fn generated_salts_are_unique() {
        let salts: HashSet<String> = (0..512).map(|_| generate_salt()).collect();
        assert_eq!(salts.len(), 512);
    }

    #[test]
    fn verify_accepts_matching_secret_only() {
        let salt = generate_salt();
        let stored = digest("Secr3t!", &salt).unwrap();
        assert!(verify("Secr3t!", &salt, &stored).unwrap());
        assert!(!verify("wrong", &salt, &stored).unwrap());
    }

    #[test]
    fn verify_rejects_digest_made_under_another_salt() {
        let stored = digest("Secr3t!", &generate_salt()).unwrap();
        assert!(!verify("Secr3t!", &generate_salt(), &stored).unwrap());
    }

    #[test]
    fn verify_reports_malformed_stored_digest() {
        let err = verify("Secr3t!", &generate_salt(), "not-a-phc-string").unwrap_err();
        assert!(matches!(err, CredentialError::MalformedDigest(_)));
    }

    #[test]
    fn session_key_debug_is_redacted() {
        let key = SessionKey::new("hunter2");
        assert_eq!(format!("{key:?}"), "SessionKey(<redacted>)");
        assert_eq!(key.expose(), "hunter2");
    }
}
