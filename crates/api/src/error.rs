//! Domain error to HTTP response mapping.
//!
//! Every error renders as `{"error": <code>, "message": <text>}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

use moneta_core::category::CategoryError;
use moneta_core::entry::EntryError;
use moneta_core::import::ImportError;
use moneta_core::user::UserError;
use moneta_shared::JwtError;

/// Error returned by every handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status.
    pub status: StatusCode,
    /// Machine-readable code.
    pub code: &'static str,
    /// Human-readable message.
    pub message: String,
}

impl ApiError {
    /// Builds an error from its parts.
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    /// Caller tried to act on another user's data.
    #[must_use]
    pub fn forbidden() -> Self {
        Self::new(
            StatusCode::FORBIDDEN,
            "FORBIDDEN",
            "You cannot access another user's data.",
        )
    }

    /// Upload exceeded the configured limit.
    #[must_use]
    pub fn payload_too_large(limit: usize) -> Self {
        Self::new(
            StatusCode::PAYLOAD_TOO_LARGE,
            "PAYLOAD_TOO_LARGE",
            format!("Maximum upload size exceeded; the limit is {limit} bytes."),
        )
    }

    fn from_domain(status: u16, code: &'static str, message: String) -> Self {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            error!(code, error = %message, "request failed");
            return Self::new(status, code, "An internal error occurred.");
        }
        Self::new(status, code, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(json!({
                "error": self.code,
                "message": self.message,
            })),
        )
            .into_response()
    }
}

macro_rules! from_domain_error {
    ($($error:ty),+ $(,)?) => {
        $(
            impl From<$error> for ApiError {
                fn from(err: $error) -> Self {
                    Self::from_domain(err.http_status_code(), err.error_code(), err.to_string())
                }
            }
        )+
    };
}

from_domain_error!(EntryError, ImportError, CategoryError, UserError, JwtError);
