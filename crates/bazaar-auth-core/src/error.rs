//! Auth errors

use thiserror::Error;

/// Token decode/encode failures.
///
/// None of these reach a caller of the request pipeline: the resolver turns
/// every one of them into an anonymous principal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Unparseable, wrongly signed or missing required claims
    #[error("malformed token")]
    Malformed,

    /// Valid signature, past expiry
    #[error("token expired")]
    Expired,

    /// Token (or principal) belongs to a different trust domain
    #[error("token belongs to another trust domain")]
    DomainMismatch,

    /// Signing failed
    #[error("token encoding failed: {0}")]
    Encoding(String),
}

/// Capability gate denial reasons.
///
/// These are stable and surfaced verbatim to callers.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    /// No authenticated principal
    #[error("authentication required")]
    Unauthenticated,

    /// Principal lacks the required role
    #[error("insufficient role")]
    InsufficientRole,

    /// Seller has no store in the active state
    #[error("an active store is required")]
    NoActiveStore,

    /// Principal is neither the target subject nor staff
    #[error("operation allowed only on your own account")]
    NotSelf,
}

impl Denial {
    /// Get HTTP status code for this denial
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Unauthenticated => 401,
            Self::InsufficientRole | Self::NoActiveStore | Self::NotSelf => 403,
        }
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::InsufficientRole => "INSUFFICIENT_ROLE",
            Self::NoActiveStore => "NO_ACTIVE_STORE",
            Self::NotSelf => "NOT_SELF",
        }
    }
}

/// Login failures
#[derive(Error, Debug)]
pub enum LoginError {
    /// Unknown identifier, wrong password or inactive account
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Credentials are fine but the domain requires a role the subject lacks
    #[error("account does not hold the role required for this endpoint")]
    InsufficientRole,

    /// Database error
    #[error("database error: {0}")]
    Database(String),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl LoginError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidCredentials => 401,
            Self::InsufficientRole => 403,
            Self::Database(_) | Self::Internal(_) => 500,
        }
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InsufficientRole => "INSUFFICIENT_ROLE",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<bazaar_db::DbError> for LoginError {
    fn from(err: bazaar_db::DbError) -> Self {
        tracing::error!("Database error during login: {}", err);
        Self::Database(err.to_string())
    }
}

/// Authorization errors raised by the capability gate
#[derive(Error, Debug)]
pub enum AuthError {
    /// Requirement not met
    #[error(transparent)]
    Denied(#[from] Denial),

    /// Database error while evaluating a requirement
    #[error("database error: {0}")]
    Database(String),
}

impl AuthError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Denied(denial) => denial.status_code(),
            Self::Database(_) => 500,
        }
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Denied(denial) => denial.error_code(),
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// The denial, if this is one
    pub fn denial(&self) -> Option<Denial> {
        match self {
            Self::Denied(denial) => Some(*denial),
            Self::Database(_) => None,
        }
    }
}

impl From<bazaar_db::DbError> for AuthError {
    fn from(err: bazaar_db::DbError) -> Self {
        tracing::error!("Database error: {}", err);
        Self::Database(err.to_string())
    }
}
