//! Regular-user account handlers

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use bazaar_auth_core::Capability::{self, Authenticated};
use bazaar_auth_core::NewUser;
use bazaar_axum::Caller;
use bazaar_db::{SuperAdminRepository, UserRepository};
use bazaar_types::{PrincipalSummary, RegularUser};
use serde::Deserialize;

use super::{caller_id, caller_summary};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// POST /api/user/register
pub async fn register<U, S>(
    State(state): State<AppState<U, S>>,
    caller: Caller,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<RegularUser>)>
where
    U: UserRepository + 'static,
    S: SuperAdminRepository + 'static,
{
    state
        .auth
        .gate()
        .guard(&[Capability::None], caller.principal(), || async {
            let user = state
                .auth
                .accounts()
                .register(NewUser {
                    email: req.email,
                    username: req.username,
                    password: req.password,
                })
                .await?;
            Ok::<_, ApiError>((StatusCode::CREATED, Json(user)))
        })
        .await
}

/// GET /api/user/me
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
        .guard(&[Authenticated], caller.principal(), || async {
            Ok::<_, ApiError>(Json(caller_summary(caller.principal())?))
        })
        .await
}

/// POST /api/user/seller
///
/// Idempotent. Opening a store is a separate step.
pub async fn activate_seller<U, S>(
    State(state): State<AppState<U, S>>,
    caller: Caller,
) -> ApiResult<Json<RegularUser>>
where
    U: UserRepository + 'static,
    S: SuperAdminRepository + 'static,
{
    state
        .auth
        .gate()
        .guard(&[Authenticated], caller.principal(), || async {
            let id = caller_id(caller.principal())?;
            let user = state.auth.accounts().activate_seller(id).await?;
            Ok::<_, ApiError>(Json(user))
        })
        .await
}

/// POST /api/user/password
pub async fn change_password<U, S>(
    State(state): State<AppState<U, S>>,
    caller: Caller,
    Json(req): Json<ChangePasswordRequest>,
) -> ApiResult<StatusCode>
where
    U: UserRepository + 'static,
    S: SuperAdminRepository + 'static,
{
    state
        .auth
        .gate()
        .guard(&[Authenticated], caller.principal(), || async {
            let id = caller_id(caller.principal())?;
            state
                .auth
                .accounts()
                .change_password(id, &req.current_password, &req.new_password)
                .await?;
            Ok::<_, ApiError>(StatusCode::NO_CONTENT)
        })
        .await
}
