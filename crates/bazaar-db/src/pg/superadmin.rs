//! PostgreSQL super-admin repository implementation

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::map_unique;
use crate::error::{DbError, DbResult};
use crate::models::SuperAdminRow;
use crate::repo::{CreateSuperAdmin, SuperAdminRepository};

/// PostgreSQL super-admin repository
#[derive(Clone)]
pub struct PgSuperAdminRepository {
    pool: PgPool,
}

impl PgSuperAdminRepository {
    /// Create a new super-admin repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SuperAdminRepository for PgSuperAdminRepository {
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<SuperAdminRow>> {
        let row = sqlx::query_as::<_, SuperAdminRow>(
            r#"
            SELECT id, username, email, password_hash, created_at
            FROM superadmins
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_by_email(&self, email: &str) -> DbResult<Option<SuperAdminRow>> {
        let row = sqlx::query_as::<_, SuperAdminRow>(
            r#"
            SELECT id, username, email, password_hash, created_at
            FROM superadmins
            WHERE lower(email) = lower($1)
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn list(&self) -> DbResult<Vec<SuperAdminRow>> {
        let rows = sqlx::query_as::<_, SuperAdminRow>(
            r#"
            SELECT id, username, email, password_hash, created_at
            FROM superadmins
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn create_if_none(&self, admin: CreateSuperAdmin) -> DbResult<Option<SuperAdminRow>> {
        // The singleton index turns a concurrent second insert into a unique violation.
        let result = sqlx::query_as::<_, SuperAdminRow>(
            r#"
            INSERT INTO superadmins (id, username, email, password_hash)
            SELECT $1, $2, $3, $4
            WHERE NOT EXISTS (SELECT 1 FROM superadmins)
            RETURNING id, username, email, password_hash, created_at
            "#,
        )
        .bind(admin.id)
        .bind(&admin.username)
        .bind(&admin.email)
        .bind(&admin.password_hash)
        .fetch_optional(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(row),
            Err(e) => match map_unique(e, &[("superadmins_singleton", "superadmin")]) {
                DbError::Duplicate(_) => Ok(None),
                other => Err(other),
            },
        }
    }
}
