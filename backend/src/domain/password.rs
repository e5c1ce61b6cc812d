//! Password handling: plaintext wrapper, Argon2id hashing, verification.
//!
//! Plaintext passwords live inside [`Password`], which zeroizes its buffer on
//! drop and never implements `Serialize` or `Display`. Stored credentials are
//! PHC-format Argon2id strings wrapped in [`PasswordHash`].

use argon2::password_hash::{PasswordHash as PhcHash, PasswordVerifier, SaltString};
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHasher as _};
use thiserror::Error;
use zeroize::Zeroizing;

use super::Error;

/// Minimum accepted password length.
pub const PASSWORD_MIN: usize = 8;
/// Maximum accepted password length.
pub const PASSWORD_MAX: usize = 128;

/// Validation errors raised by [`Password::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordValidationError {
    /// Password missing or blank.
    #[error("A password is required.")]
    Empty,
    /// Shorter than [`PASSWORD_MIN`] characters.
    #[error("password must be at least {PASSWORD_MIN} characters")]
    TooShort,
    /// Longer than [`PASSWORD_MAX`] characters.
    #[error("password must be at most {PASSWORD_MAX} characters")]
    TooLong,
}

/// Plaintext password accepted from a request body.
///
/// Write-only by construction: the inner buffer is zeroized on drop and the
/// type exposes bytes solely to the hashing routines below.
#[derive(Clone)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Validate and construct a [`Password`].
    pub fn new(value: impl Into<String>) -> Result<Self, PasswordValidationError> {
        let raw = Zeroizing::new(value.into());
        if raw.trim().is_empty() {
            return Err(PasswordValidationError::Empty);
        }
        let length = raw.chars().count();
        if length < PASSWORD_MIN {
            return Err(PasswordValidationError::TooShort);
        }
        if length > PASSWORD_MAX {
            return Err(PasswordValidationError::TooLong);
        }
        Ok(Self(raw))
    }

    fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Stored Argon2id credential in PHC string format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an already-hashed credential loaded from storage.
    pub fn from_stored(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the PHC string for persistence.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Hash a plaintext password with Argon2id and a fresh random salt.
///
/// # Errors
/// Returns an internal [`Error`] if the hashing backend fails; the message
/// never includes password material.
pub fn hash_password(password: &Password) -> Result<PasswordHash, Error> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| PasswordHash(hash.to_string()))
        .map_err(|error| Error::internal(format!("password hashing failed: {error}")))
}

/// Verify a plaintext password against a stored hash.
///
/// An unparsable stored hash counts as a mismatch rather than an error so a
/// corrupted row cannot be distinguished from a wrong password by callers.
pub fn verify_password(password: &Password, stored: &PasswordHash) -> bool {
    let Ok(parsed) = PhcHash::new(stored.as_str()) else {
        tracing::warn!("stored password hash is not valid PHC format");
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", PasswordValidationError::Empty)]
    #[case("        ", PasswordValidationError::Empty)]
    #[case("short1", PasswordValidationError::TooShort)]
    fn rejects_invalid_passwords(#[case] raw: &str, #[case] expected: PasswordValidationError) {
        assert_eq!(Password::new(raw).expect_err("invalid"), expected);
    }

    #[test]
    fn rejects_overlong_password() {
        let raw = "x".repeat(PASSWORD_MAX + 1);
        assert_eq!(
            Password::new(raw).expect_err("too long"),
            PasswordValidationError::TooLong
        );
    }

    #[test]
    fn hash_then_verify_round_trip() {
        let password = Password::new("password1").expect("valid password");
        let hash = hash_password(&password).expect("hashing succeeds");
        assert_ne!(hash.as_str(), "password1");
        assert!(hash.as_str().starts_with("$argon2"));
        assert!(verify_password(&password, &hash));

        let wrong = Password::new("password2").expect("valid password");
        assert!(!verify_password(&wrong, &hash));
    }

    #[test]
    fn corrupted_hash_is_a_mismatch() {
        let password = Password::new("password1").expect("valid password");
        let stored = PasswordHash::from_stored("not-a-phc-string");
        assert!(!verify_password(&password, &stored));
    }

    #[test]
    fn debug_never_prints_the_password() {
        let password = Password::new("password1").expect("valid password");
        assert_eq!(format!("{password:?}"), "Password(<redacted>)");
    }
}
