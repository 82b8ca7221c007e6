//! User model and credential handling for Farmstead
//!
//! Users exist to gate the web client behind a login form. Passwords are
//! stored as SHA-256 hex digests, never in clear text.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use super::error::{ValidationError, ValidationErrorKind, ValidationResult};
use super::validation::{min_length, required_trimmed};

/// Minimum accepted password length at registration
pub const MIN_PASSWORD_LENGTH: usize = 4;

/// A stored user record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Store-issued identifier, surfaced to clients as a string
    pub id: Uuid,

    /// Unique login name (case-sensitive)
    pub username: String,

    /// SHA-256 hex digest of the password
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// When this user was registered
    pub created_at: DateTime<Utc>,
}

/// A validated user ready for insertion
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
}

/// Raw credentials payload for login and registration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CredentialsPayload {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl CredentialsPayload {
    /// Validate a registration payload into a [`NewUser`]
    ///
    /// The username is trimmed and must be non-empty; the password must be
    /// at least [`MIN_PASSWORD_LENGTH`] characters. The uniqueness check
    /// against existing users happens at the handler, where the store is
    /// available.
    pub fn into_registration(self) -> ValidationResult<NewUser> {
        if self.username.is_none() || self.password.is_none() {
            return Err(ValidationError::new(
                ValidationErrorKind::RequiredField,
                if self.username.is_none() {
                    "username"
                } else {
                    "password"
                },
            ));
        }

        let username = required_trimmed(self.username.as_deref(), "username")?;
        let password = self.password.unwrap_or_default();
        min_length(&password, "password", MIN_PASSWORD_LENGTH)?;

        Ok(NewUser {
            username,
            password_hash: hash_password(&password),
        })
    }

    /// Extract login credentials as (username, password digest)
    ///
    /// Unlike registration, the username is matched exactly as sent.
    pub fn into_login(self) -> ValidationResult<(String, String)> {
        match (self.username, self.password) {
            (Some(username), Some(password)) => Ok((username, hash_password(&password))),
            (None, _) => Err(ValidationError::new(
                ValidationErrorKind::RequiredField,
                "username",
            )),
            (_, None) => Err(ValidationError::new(
                ValidationErrorKind::RequiredField,
                "password",
            )),
        }
    }
}

/// Compute the SHA-256 hex digest of a password
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}
