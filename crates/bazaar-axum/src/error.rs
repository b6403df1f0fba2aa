//! Error responses for auth denials.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bazaar_auth_core::{AuthError, Denial};
use serde::Serialize;

/// JSON error envelope shared by every endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

impl ErrorBody {
    #[must_use]
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                code,
                message: message.into(),
            },
        }
    }

    /// Render with the given status.
    pub fn into_response_with(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

/// Authorization failures surfaced by extractors and gates.
#[derive(Debug, thiserror::Error)]
pub enum AuthRejection {
    /// A capability requirement was not met.
    #[error(transparent)]
    Denied(#[from] Denial),

    /// The requirement could not be evaluated.
    #[error("authorization unavailable: {0}")]
    Unavailable(String),

    /// The route is not wrapped in a `PrincipalLayer`.
    #[error("request context missing")]
    MissingContext,
}

impl From<AuthError> for AuthRejection {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Denied(denial) => Self::Denied(denial),
            AuthError::Database(msg) => Self::Unavailable(msg),
        }
    }
}

impl AuthRejection {
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Denied(denial) => StatusCode::from_u16(denial.status_code())
                .unwrap_or(StatusCode::FORBIDDEN),
            Self::Unavailable(_) | Self::MissingContext => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Denied(denial) => denial.error_code(),
            Self::Unavailable(_) => "AUTHORIZATION_UNAVAILABLE",
            Self::MissingContext => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let message = match &self {
            Self::Denied(denial) => denial.to_string(),
            Self::Unavailable(msg) => {
                tracing::error!("Authorization check failed: {}", msg);
                "internal error".to_string()
            }
            Self::MissingContext => {
                tracing::error!("Handler reached without a request context");
                "internal error".to_string()
            }
        };

        ErrorBody::new(self.error_code(), message).into_response_with(self.status_code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_denial_statuses() {
        assert_eq!(
            AuthRejection::from(Denial::Unauthenticated).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthRejection::from(Denial::NoActiveStore).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AuthRejection::from(AuthError::Database("down".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_body_shape() {
        let body = serde_json::to_value(ErrorBody::new("NOT_SELF", "nope")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "error": { "code": "NOT_SELF", "message": "nope" } })
        );
    }
}
