//! Entry error types.
//!
//! The rule-set and status messages are user-facing and fixed; clients match on them.

use thiserror::Error;

/// Errors that can occur during entry operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
    // ========== Rule Set Violations ==========
    /// Description missing, blank or too long.
    #[error("Provide a valid description.")]
    InvalidDescription,

    /// Month missing or outside 1-12.
    #[error("Provide a valid month.")]
    InvalidMonth,

    /// Year missing or not four digits.
    #[error("Provide a valid year.")]
    InvalidYear,

    /// Owner missing.
    #[error("Provide a user.")]
    MissingUser,

    /// Amount missing, not positive, or outside the stored numeric format.
    #[error("Provide a valid amount.")]
    InvalidAmount,

    /// Type missing.
    #[error("Provide an entry type.")]
    MissingType,

    /// Latitude outside the stored numeric format.
    #[error("Latitude outside the NUMERIC(9,6) format.")]
    InvalidLatitude,

    /// Longitude outside the stored numeric format.
    #[error("Longitude outside the NUMERIC(9,6) format.")]
    InvalidLongitude,

    // ========== Status Errors ==========
    /// Entry is settled or cancelled and cannot be edited.
    #[error("Cannot update an entry that has already been settled or cancelled.")]
    EntryLocked,

    /// Entry period lies after the current month.
    #[error("An entry cannot be settled with a future date.")]
    FutureSettlement,

    /// Requested status is not a valid target.
    #[error("Send a valid status to update the entry.")]
    InvalidStatus,

    // ========== Query Errors ==========
    /// Query parameter out of range.
    #[error("{0}")]
    InvalidQuery(String),

    // ========== Lookup Errors ==========
    /// Entry not found.
    #[error("Entry not found.")]
    NotFound,

    /// Owner not found.
    #[error("User not found for the given id.")]
    UserNotFound,

    /// Category not found.
    #[error("Category not found for the given id.")]
    CategoryNotFound,

    // ========== Storage Errors ==========
    /// Storage failure.
    #[error("Repository error: {0}")]
    Repository(String),
}

impl EntryError {
    /// Create a repository error.
    pub fn repository(msg: impl Into<String>) -> Self {
        Self::Repository(msg.into())
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidDescription
            | Self::InvalidMonth
            | Self::InvalidYear
            | Self::MissingUser
            | Self::InvalidAmount
            | Self::MissingType
            | Self::InvalidLatitude
            | Self::InvalidLongitude => "BUSINESS_RULE_VIOLATION",
            Self::EntryLocked => "ENTRY_LOCKED",
            Self::FutureSettlement => "FUTURE_SETTLEMENT",
            Self::InvalidStatus => "INVALID_STATUS",
            Self::InvalidQuery(_) => "INVALID_QUERY",
            Self::NotFound => "ENTRY_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::CategoryNotFound => "CATEGORY_NOT_FOUND",
            Self::Repository(_) => "REPOSITORY_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::NotFound | Self::UserNotFound => 404,
            Self::Repository(_) => 500,
            _ => 400,
        }
    }
}
