//! Gateway error types with HTTP status code mapping.
//!
//! [`GatewayError`] is the central error type for the service and REST
//! layers. Each variant maps to a specific HTTP status code and structured
//! JSON error response. Draft validation findings are not errors in this
//! sense; they only become one ([`GatewayError::ValidationFailed`]) when a
//! create or update request is refused because of them.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::validation::ValidationError;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 1002,
///     "message": "validation failed with 2 error(s)",
///     "details": [ { "field": "name", "rule": "name_required", "message": "..." } ]
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details, such as validation findings.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<serde_json::Value>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category        | HTTP Status                  |
/// |-----------|-----------------|------------------------------|
/// | 1000–1999 | Request         | 400 Bad Request / 422        |
/// | 2000–2999 | State/Not Found | 404 Not Found / 409 Conflict |
/// | 3000–3999 | Server          | 500 / 503 Service Unavailable |
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Request is malformed or references rows it may not touch.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The draft event did not pass validation.
    #[error("validation failed with {} error(s)", .0.len())]
    ValidationFailed(Vec<ValidationError>),

    /// Event with the given ID was not found.
    #[error("event not found: {0}")]
    EventNotFound(uuid::Uuid),

    /// Another event already uses the slug.
    #[error("slug already in use: {0}")]
    SlugTaken(String),

    /// Persistence layer failure.
    #[error("persistence error: {0}")]
    PersistenceError(String),

    /// The audit log is not configured on this instance.
    #[error("audit log is disabled")]
    PersistenceDisabled,

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::ValidationFailed(_) => 1002,
            Self::EventNotFound(_) => 2001,
            Self::SlugTaken(_) => 2002,
            Self::PersistenceError(_) => 3001,
            Self::PersistenceDisabled => 3002,
            Self::Internal(_) => 3000,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::ValidationFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::EventNotFound(_) => StatusCode::NOT_FOUND,
            Self::SlugTaken(_) => StatusCode::CONFLICT,
            Self::PersistenceDisabled => StatusCode::SERVICE_UNAVAILABLE,
            Self::PersistenceError(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            Self::ValidationFailed(errors) => serde_json::to_value(errors).ok(),
            _ => None,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: self.details(),
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
