//! Import error types.
//!
//! These abort the whole call before any row is processed. Row-level
//! problems are reported inside the result instead.

use thiserror::Error;

/// Errors that can occur during an import.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    /// The upload has no content.
    #[error("The CSV file is empty.")]
    EmptyFile,

    /// The upload is not named `*.csv`.
    #[error("The file must have the .csv extension.")]
    InvalidExtension,

    /// The target user does not exist.
    #[error("User not found for the given id.")]
    UserNotFound,

    /// Storage failure.
    #[error("Repository error: {0}")]
    Repository(String),
}

impl ImportError {
    /// Create a repository error.
    pub fn repository(msg: impl Into<String>) -> Self {
        Self::Repository(msg.into())
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyFile => "EMPTY_FILE",
            Self::InvalidExtension => "INVALID_EXTENSION",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::Repository(_) => "REPOSITORY_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::EmptyFile | Self::InvalidExtension => 400,
            Self::UserNotFound => 404,
            Self::Repository(_) => 500,
        }
    }
}
