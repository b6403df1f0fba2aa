//! PostgreSQL audit log repository implementation

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DbResult;
use crate::repo::{AuditLogRepository, CreateAuditLog};

/// PostgreSQL audit log repository
#[derive(Clone)]
pub struct PgAuditLogRepository {
    pool: PgPool,
}

impl PgAuditLogRepository {
    /// Create a new audit log repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditLogRepository for PgAuditLogRepository {
    async fn record(&self, entry: CreateAuditLog) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO audit_log
                (id, subject_id, domain, action, route, origin, ip_address, outcome, details)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(entry.subject_id)
        .bind(&entry.domain)
        .bind(&entry.action)
        .bind(&entry.route)
        .bind(&entry.origin)
        .bind(&entry.ip_address)
        .bind(entry.outcome.as_str())
        .bind(&entry.details)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
