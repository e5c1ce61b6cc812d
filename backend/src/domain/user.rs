//! User identity model and its validated value objects.
//!
//! `Username` and `Email` validate on construction so the rest of the system
//! never sees a malformed identifier. Both serialise as plain strings via
//! `try_from`, rejecting invalid wire input during deserialisation.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::password::PasswordHash;

/// Maximum length shared by usernames and email addresses.
pub const IDENTIFIER_MAX: usize = 255;

/// Validation errors raised by [`Username`] and [`Email`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserValidationError {
    /// Username missing or blank.
    #[error("Users must have a username.")]
    EmptyUsername,
    /// Username exceeds [`IDENTIFIER_MAX`] characters.
    #[error("username must be at most {IDENTIFIER_MAX} characters")]
    UsernameTooLong,
    /// Username contains whitespace or control characters.
    #[error("username must not contain whitespace")]
    UsernameInvalidCharacters,
    /// Email missing or blank.
    #[error("Users must have an email address.")]
    EmptyEmail,
    /// Email exceeds [`IDENTIFIER_MAX`] characters.
    #[error("email must be at most {IDENTIFIER_MAX} characters")]
    EmailTooLong,
    /// Email does not look like `local@domain`.
    #[error("email must be a valid email address")]
    InvalidEmail,
}

/// Unique, human-readable account identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    pub fn new(value: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if raw.chars().count() > IDENTIFIER_MAX {
            return Err(UserValidationError::UsernameTooLong);
        }
        if raw.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(UserValidationError::UsernameInvalidCharacters);
        }
        Ok(Self(raw))
    }

    /// Borrow the underlying string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Deliberately permissive: one `@`, non-empty local part, dotted domain.
        let pattern = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Login identifier. Email, not username, is the authentication key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validate and construct an [`Email`]. The address is lowercased so
    /// lookups are case-insensitive.
    pub fn new(value: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if raw.chars().count() > IDENTIFIER_MAX {
            return Err(UserValidationError::EmailTooLong);
        }
        if !email_regex().is_match(&raw) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(raw.to_lowercase()))
    }

    /// Borrow the underlying string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl TryFrom<String> for Email {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Persisted user account.
///
/// The password hash never serialises; HTTP DTOs are built field-by-field in
/// the inbound adapter.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// Stable identifier (UUID v4).
    pub id: Uuid,
    /// Unique display/login name.
    pub username: Username,
    /// Unique login email.
    pub email: Email,
    /// Argon2id hash of the account password.
    pub password_hash: PasswordHash,
    /// Deactivated accounts keep their rows but cannot log in.
    pub is_active: bool,
    /// Grants access to administrative tooling.
    pub is_staff: bool,
    /// Full administrative rights.
    pub is_superuser: bool,
    /// Set once when the row is inserted.
    pub created_at: DateTime<Utc>,
    /// Refreshed by the write path on every mutation.
    pub updated_at: DateTime<Utc>,
}

/// Explicit patch applied by `PATCH /api/user`.
///
/// Only populated fields overwrite the stored values; everything else keeps
/// its current state. Replaces the original system's dynamic
/// attribute-by-attribute copy with an enumerated merge surface.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    /// Replacement username.
    pub username: Option<Username>,
    /// Replacement email.
    pub email: Option<Email>,
    /// Replacement password hash (already re-hashed by the service).
    pub password_hash: Option<PasswordHash>,
    /// Replacement profile bio.
    pub bio: Option<String>,
    /// Replacement profile image URL.
    pub image: Option<String>,
}

impl UserPatch {
    /// True when the patch carries no changes at all.
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.email.is_none()
            && self.password_hash.is_none()
            && self.bio.is_none()
            && self.image.is_none()
    }
}
