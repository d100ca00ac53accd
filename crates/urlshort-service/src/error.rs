//! Service and API error types.
//!
//! `ServiceError` is the taxonomy of the allocation and link-service layer.
//! `ApiError` is what handlers return; it knows how to render itself as an
//! HTTP response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use urlshort_core::CoreError;
use urlshort_store::StoreError;

/// Errors raised by the code allocator and the link service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Malformed caller input, such as a custom code with bad characters.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The short code is already taken.
    #[error("short code already exists: {0}")]
    Conflict(String),

    /// No link exists for the code.
    #[error("not found: {0}")]
    NotFound(String),

    /// Every random candidate collided with an existing code.
    #[error("could not allocate a unique code after {attempts} attempts")]
    Exhausted {
        /// Number of candidates tried.
        attempts: usize,
    },

    /// The store failed.
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict { code } => Self::Conflict(code),
            StoreError::Database(msg) | StoreError::Serialization(msg) => Self::Storage(msg),
        }
    }
}

impl From<CoreError> for ServiceError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidCode(_) | CoreError::InvalidUrl(_) => {
                Self::InvalidInput(err.to_string())
            }
            CoreError::Timestamp(msg) => Self::Storage(msg),
        }
    }
}

/// API error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Bad request - invalid input.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Request body or fields could not be parsed or validated.
    #[error("unprocessable entity: {0}")]
    Unprocessable(String),

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Conflict - resource already exists.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// JSON error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            Self::Unprocessable(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "unprocessable_entity",
                msg,
            ),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            Self::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg),
            Self::Internal(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidInput(_) => {
                Self::BadRequest("custom_code must be alphanumeric or hyphen".into())
            }
            ServiceError::Conflict(_) => Self::Conflict("custom_code already exists".into()),
            ServiceError::NotFound(_) => Self::NotFound("Not found".into()),
            ServiceError::Exhausted { .. } => {
                Self::Internal("Failed to generate unique code".into())
            }
            ServiceError::Storage(msg) => Self::Internal(msg),
        }
    }
}

impl From<crate::qr::QrError> for ApiError {
    fn from(err: crate::qr::QrError) -> Self {
        Self::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_conflict_becomes_service_conflict() {
        let err = ServiceError::from(StoreError::Conflict { code: "abc".into() });
        assert!(matches!(err, ServiceError::Conflict(code) if code == "abc"));
    }

    #[test]
    fn status_codes() {
        let cases = [
            (ServiceError::InvalidInput("x".into()), StatusCode::BAD_REQUEST),
            (ServiceError::Conflict("x".into()), StatusCode::CONFLICT),
            (ServiceError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (
                ServiceError::Exhausted { attempts: 10 },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ServiceError::Storage("disk".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            let response = ApiError::from(err).into_response();
            assert_eq!(response.status(), status);
        }
    }
}
