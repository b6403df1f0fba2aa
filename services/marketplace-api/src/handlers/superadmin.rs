//! Super-administrator handlers

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use bazaar_auth_core::Capability::{self, Authenticated, SuperOnly};
use bazaar_auth_core::NewSuperAdmin;
use bazaar_axum::Caller;
use bazaar_db::{SuperAdminRepository, UserRepository};
use bazaar_types::{PrincipalSummary, SuperAdmin};
use serde::Deserialize;

use super::caller_summary;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct BootstrapRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// POST /api/superadmin/bootstrap
///
/// Open to anyone until the first super-admin exists, refused afterwards.
pub async fn bootstrap<U, S>(
    State(state): State<AppState<U, S>>,
    caller: Caller,
    Json(req): Json<BootstrapRequest>,
) -> ApiResult<(StatusCode, Json<SuperAdmin>)>
where
    U: UserRepository + 'static,
    S: SuperAdminRepository + 'static,
{
    state
        .auth
        .gate()
        .guard(&[Capability::None], caller.principal(), || async {
            let admin = state
                .auth
                .accounts()
                .bootstrap_superadmin(NewSuperAdmin {
                    username: req.username,
                    email: req.email,
                    password: req.password,
                })
                .await?;
            Ok::<_, ApiError>((StatusCode::CREATED, Json(admin)))
        })
        .await
}

/// GET /api/superadmin/me
pub async fn me<U, S>(
    State(state): State<AppState<U, S>>,
    caller: Caller,
) -> ApiResult<Json<PrincipalSummary>>
where
    U: UserRepository + 'static,
    S: SuperAdminRepository + 'static,
{
    state
        .auth
        .gate()
        .guard(&[Authenticated, SuperOnly], caller.principal(), || async {
            Ok::<_, ApiError>(Json(caller_summary(caller.principal())?))
        })
        .await
}

/// GET /api/superadmin/superadmins
pub async fn list<U, S>(
    State(state): State<AppState<U, S>>,
    caller: Caller,
) -> ApiResult<Json<Vec<SuperAdmin>>>
where
    U: UserRepository + 'static,
    S: SuperAdminRepository + 'static,
{
    state
        .auth
        .gate()
        .guard(&[Authenticated, SuperOnly], caller.principal(), || async {
            Ok::<_, ApiError>(Json(state.auth.accounts().list_superadmins().await?))
        })
        .await
}
