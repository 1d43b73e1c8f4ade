//! API error handling
//!
//! Every failure leaves the server as `{status: "error", statusCode, message}`.
//! Internal errors are logged and answered with a generic message so storage
//! details never reach the client.

use application::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::DomainError;
use serde::Serialize;
use thiserror::Error;

/// Message sent in place of internal error details
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status for this error
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message placed in the response body
    fn public_message(&self) -> &str {
        match self {
            Self::BadRequest(msg)
            | Self::Unauthorized(msg)
            | Self::Forbidden(msg)
            | Self::NotFound(msg) => msg,
            Self::Internal(_) => INTERNAL_ERROR_MESSAGE,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Always `"error"`
    pub status: &'static str,
    /// HTTP status code, repeated in the body
    pub status_code: u16,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let Self::Internal(detail) = &self {
            tracing::error!(error = %detail, "Request failed with internal error");
        }

        let body = ErrorResponse {
            status: "error",
            status_code: status.as_u16(),
            message: self.public_message().to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Domain(DomainError::NotFound { entity_type, .. }) => {
                Self::NotFound(format!("{entity_type} not found"))
            },
            ApplicationError::Domain(e @ DomainError::ValidationError(_)) => {
                Self::BadRequest(e.to_string())
            },
            ApplicationError::NotFound(msg) => Self::NotFound(msg),
            ApplicationError::Storage(msg) | ApplicationError::Internal(msg) => {
                Self::Internal(msg)
            },
        }
    }
}
