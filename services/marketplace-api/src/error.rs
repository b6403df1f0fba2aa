//! Error types for the marketplace API service.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bazaar_auth_core::{AccountError, AuthError, LoginError};
use bazaar_axum::{AuthRejection, ErrorBody};

/// API error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Login(#[from] LoginError),

    #[error(transparent)]
    Account(#[from] AccountError),

    #[error(transparent)]
    Auth(#[from] AuthRejection),

    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        Self::Auth(AuthRejection::from(err))
    }
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Login(e) => status(e.status_code()),
            Self::Account(e) => status(e.status_code()),
            Self::Auth(e) => e.status_code(),
            Self::UnknownOperation(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Login(e) => e.error_code(),
            Self::Account(e) => e.error_code(),
            Self::Auth(e) => e.error_code(),
            Self::UnknownOperation(_) => "UNKNOWN_OPERATION",
            Self::BadRequest(_) => "BAD_REQUEST",
        }
    }
}

fn status(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Rejections render and log themselves
        let err = match self {
            Self::Auth(rejection) => return rejection.into_response(),
            other => other,
        };

        let status = err.status_code();
        let message = if status.is_server_error() {
            tracing::error!(error = ?err, "Internal API error");
            "internal error".to_string()
        } else {
            err.to_string()
        };

        ErrorBody::new(err.error_code(), message).into_response_with(status)
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
