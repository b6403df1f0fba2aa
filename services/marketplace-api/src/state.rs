//! Application state

use std::ops::Deref;
use std::sync::Arc;

use bazaar_auth_core::AuthService;
use bazaar_db::pg::{PgSuperAdminRepository, PgUserRepository};
use bazaar_db::{DbPool, SuperAdminRepository, UserRepository};

/// Shared database pool wrapper for health checks
#[derive(Clone)]
pub struct SharedPool(Arc<DbPool>);

impl Deref for SharedPool {
    type Target = DbPool;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Application state shared across handlers.
///
/// Generic over the subject repositories; production runs on Postgres.
pub struct AppState<U = PgUserRepository, S = PgSuperAdminRepository>
where
    U: UserRepository,
    S: SuperAdminRepository,
{
    /// Resolution, login, gating and account operations
    pub auth: Arc<AuthService<U, S>>,
    /// Database connection pool (readiness check)
    pub pool: SharedPool,
}

impl<U, S> AppState<U, S>
where
    U: UserRepository,
    S: SuperAdminRepository,
{
    pub fn new(auth: AuthService<U, S>, pool: DbPool) -> Self {
        Self {
            auth: Arc::new(auth),
            pool: SharedPool(Arc::new(pool)),
        }
    }
}

impl<U, S> Clone for AppState<U, S>
where
    U: UserRepository,
    S: SuperAdminRepository,
{
    fn clone(&self) -> Self {
        Self {
            auth: Arc::clone(&self.auth),
            pool: self.pool.clone(),
        }
    }
}
