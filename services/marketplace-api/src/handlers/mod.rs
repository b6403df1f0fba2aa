//! HTTP handlers
//!
//! `login` and `authorize` are shared by the three trust-domain routers; the
//! domain comes from the router's `PrincipalLayer`.

pub mod admin;
mod authorize;
mod health;
mod session;
pub mod superadmin;
pub mod user;

pub use authorize::authorize;
pub use health::{health, ready};
pub use session::login;

use bazaar_auth_core::Denial;
use bazaar_axum::AuthRejection;
use bazaar_types::{Principal, PrincipalSummary, SubjectId};

use crate::error::{ApiError, ApiResult};

/// Identity of a caller that already passed `Authenticated`
fn caller_id(principal: &Principal) -> ApiResult<SubjectId> {
    principal
        .id()
        .ok_or(ApiError::Auth(AuthRejection::Denied(Denial::Unauthenticated)))
}

fn caller_summary(principal: &Principal) -> ApiResult<PrincipalSummary> {
    principal
        .summary()
        .ok_or(ApiError::Auth(AuthRejection::Denied(Denial::Unauthenticated)))
}
