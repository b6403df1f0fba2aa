//! Authorization decisions for the external CRUD layer

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use bazaar_axum::Caller;
use bazaar_db::{SuperAdminRepository, UserRepository};
use bazaar_types::SubjectId;
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::operations;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AuthorizeRequest {
    pub operation: String,
    #[serde(default)]
    pub target_id: Option<SubjectId>,
}

/// POST /api/{domain}/authorize
///
/// 204 when the caller may perform `operation` on this domain, otherwise the
/// typed denial.
pub async fn authorize<U, S>(
    State(state): State<AppState<U, S>>,
    caller: Caller,
    Json(req): Json<AuthorizeRequest>,
) -> ApiResult<StatusCode>
where
    U: UserRepository + 'static,
    S: SuperAdminRepository + 'static,
{
    let requirement = operations::requirement(caller.domain(), &req.operation)
        .ok_or_else(|| ApiError::UnknownOperation(req.operation.clone()))?;
    let capabilities = requirement
        .capabilities(req.target_id)
        .ok_or_else(|| ApiError::BadRequest(format!("{} requires target_id", req.operation)))?;

    state
        .auth
        .gate()
        .check_all(&capabilities, caller.principal())
        .await?;

    tracing::debug!(
        domain = %caller.domain(),
        operation = %req.operation,
        "Operation authorized"
    );
    Ok(StatusCode::NO_CONTENT)
}
