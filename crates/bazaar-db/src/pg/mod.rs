//! PostgreSQL repository implementations

mod audit;
mod store;
mod superadmin;
mod user;

pub use audit::PgAuditLogRepository;
pub use store::PgStoreRepository;
pub use superadmin::PgSuperAdminRepository;
pub use user::PgUserRepository;

use crate::{DbError, DbPool};

/// All repositories bundled together
#[derive(Clone)]
pub struct Repositories {
    pub users: PgUserRepository,
    pub superadmins: PgSuperAdminRepository,
    pub stores: PgStoreRepository,
    pub audit: PgAuditLogRepository,
}

impl Repositories {
    /// Create all repositories from a database pool
    pub fn new(pool: DbPool) -> Self {
        Self {
            users: PgUserRepository::new(pool.clone()),
            superadmins: PgSuperAdminRepository::new(pool.clone()),
            stores: PgStoreRepository::new(pool.clone()),
            audit: PgAuditLogRepository::new(pool),
        }
    }
}

/// Map unique violations on a named constraint to [`DbError::Duplicate`]
fn map_unique(err: sqlx::Error, constraints: &[(&str, &'static str)]) -> DbError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            let hit = db_err
                .constraint()
                .and_then(|name| constraints.iter().find(|(c, _)| *c == name))
                .map(|(_, field)| *field);
            if let Some(field) = hit {
                return DbError::Duplicate(field);
            }
        }
    }
    DbError::Sqlx(err)
}
