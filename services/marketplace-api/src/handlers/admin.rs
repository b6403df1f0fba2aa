//! Staff back-office account handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use bazaar_auth_core::Capability::{Authenticated, SelfOrStaff, StaffOrSuper};
use bazaar_axum::Caller;
use bazaar_db::{SuperAdminRepository, UpdateRoles, UserRepository};
use bazaar_types::{PrincipalSummary, RegularUser, SubjectId};
use serde::Deserialize;

use super::caller_summary;
use super::user::ChangePasswordRequest;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SetRolesRequest {
    pub is_staff: Option<bool>,
    pub is_seller: Option<bool>,
}

/// GET /api/admin/me
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
        .guard(&[Authenticated, StaffOrSuper], caller.principal(), || async {
            Ok::<_, ApiError>(Json(caller_summary(caller.principal())?))
        })
        .await
}

/// POST /api/admin/users/{id}/roles
pub async fn set_user_roles<U, S>(
    State(state): State<AppState<U, S>>,
    caller: Caller,
    Path(target): Path<SubjectId>,
    Json(req): Json<SetRolesRequest>,
) -> ApiResult<Json<RegularUser>>
where
    U: UserRepository + 'static,
    S: SuperAdminRepository + 'static,
{
    if req.is_staff.is_none() && req.is_seller.is_none() {
        return Err(ApiError::BadRequest("no role to change".into()));
    }

    state
        .auth
        .gate()
        .guard(&[Authenticated, StaffOrSuper], caller.principal(), || async {
            let user = state
                .auth
                .accounts()
                .set_roles(
                    target,
                    UpdateRoles {
                        is_staff: req.is_staff,
                        is_seller: req.is_seller,
                    },
                )
                .await?;
            Ok::<_, ApiError>(Json(user))
        })
        .await
}

/// POST /api/admin/users/{id}/password
///
/// Staff may change any user's password, but still need the current one.
pub async fn change_user_password<U, S>(
    State(state): State<AppState<U, S>>,
    caller: Caller,
    Path(target): Path<SubjectId>,
    Json(req): Json<ChangePasswordRequest>,
) -> ApiResult<StatusCode>
where
    U: UserRepository + 'static,
    S: SuperAdminRepository + 'static,
{
    state
        .auth
        .gate()
        .guard(&[Authenticated, SelfOrStaff(target)], caller.principal(), || async {
            state
                .auth
                .accounts()
                .change_password(target, &req.current_password, &req.new_password)
                .await?;
            Ok::<_, ApiError>(StatusCode::NO_CONTENT)
        })
        .await
}
