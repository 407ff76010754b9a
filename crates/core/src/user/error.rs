//! User error types.

use thiserror::Error;

use super::password::PasswordError;

/// Errors that can occur during user operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserError {
    /// Email is blank.
    #[error("Provide a valid email.")]
    InvalidEmail,

    /// Email already registered.
    #[error("A user is already registered with this email.")]
    EmailTaken,

    /// No user with the given email.
    #[error("User not found for the given email.")]
    EmailNotFound,

    /// Password does not match.
    #[error("Invalid password.")]
    InvalidPassword,

    /// No user with the given id.
    #[error("User not found for the given id.")]
    NotFound,

    /// Password hashing failure.
    #[error(transparent)]
    Password(#[from] PasswordError),

    /// Storage failure.
    #[error("Repository error: {0}")]
    Repository(String),
}

impl UserError {
    /// Create a repository error.
    pub fn repository(msg: impl Into<String>) -> Self {
        Self::Repository(msg.into())
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::EmailNotFound | Self::InvalidPassword => "AUTHENTICATION_FAILED",
            Self::NotFound => "USER_NOT_FOUND",
            Self::Password(_) => "PASSWORD_ERROR",
            Self::Repository(_) => "REPOSITORY_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::InvalidEmail => 400,
            Self::EmailTaken => 409,
            Self::EmailNotFound | Self::InvalidPassword => 401,
            Self::NotFound => 404,
            Self::Password(_) | Self::Repository(_) => 500,
        }
    }
}
