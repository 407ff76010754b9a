//! Category error types.

use thiserror::Error;

/// Errors that can occur during category operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CategoryError {
    /// Description is blank.
    #[error("A category must have a non-empty description.")]
    EmptyDescription,

    /// Description longer than the stored column allows.
    #[error("A category description cannot exceed 100 characters.")]
    DescriptionTooLong,

    /// Description already in use.
    #[error("A category with this description already exists.")]
    DuplicateDescription,

    /// Category not found.
    #[error("Category not found.")]
    NotFound,

    /// Storage failure.
    #[error("Repository error: {0}")]
    Repository(String),
}

impl CategoryError {
    /// Create a repository error.
    pub fn repository(msg: impl Into<String>) -> Self {
        Self::Repository(msg.into())
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyDescription => "EMPTY_DESCRIPTION",
            Self::DescriptionTooLong => "DESCRIPTION_TOO_LONG",
            Self::DuplicateDescription => "DUPLICATE_CATEGORY",
            Self::NotFound => "CATEGORY_NOT_FOUND",
            Self::Repository(_) => "REPOSITORY_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::EmptyDescription | Self::DescriptionTooLong => 400,
            Self::DuplicateDescription => 409,
            Self::NotFound => 404,
            Self::Repository(_) => 500,
        }
    }
}
