//! Login, shared by every trust domain

use axum::extract::State;
use axum::Json;
use bazaar_auth_core::{Credential, IssuedSession};
use bazaar_axum::Caller;
use bazaar_db::{SuperAdminRepository, UserRepository};
use serde::Deserialize;

use crate::error::ApiResult;
use crate::extractors::ClientMeta;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(alias = "email")]
    pub identifier: String,
    pub password: String,
}

/// POST /api/{domain}/login
///
/// Not gated: the credential itself is the proof. Admin login additionally
/// requires the account to already be staff.
pub async fn login<U, S>(
    State(state): State<AppState<U, S>>,
    caller: Caller,
    ClientMeta(meta): ClientMeta,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<IssuedSession>>
where
    U: UserRepository + 'static,
    S: SuperAdminRepository + 'static,
{
    let credential = Credential {
        identifier: req.identifier,
        password: req.password,
    };

    let session = state.auth.login(&credential, caller.domain(), &meta).await?;
    Ok(Json(session))
}
