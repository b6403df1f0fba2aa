//! Repository traits
//!
//! Async repository interfaces for the records the auth layer depends on.
//! Anything else (catalog, follows, notifications) belongs to the CRUD layer.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::DbResult;
use crate::models::*;

/// Regular user repository
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by ID
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<UserRow>>;

    /// Find a user by email, ignoring case
    async fn find_by_email(&self, email: &str) -> DbResult<Option<UserRow>>;

    /// Create a new user
    async fn create(&self, user: CreateUser) -> DbResult<UserRow>;

    /// Replace the stored password hash
    async fn update_password(&self, id: Uuid, password_hash: &str) -> DbResult<()>;

    /// Update role flags; `None` leaves a flag unchanged
    async fn update_roles(&self, id: Uuid, roles: UpdateRoles) -> DbResult<UserRow>;

    /// Delete a user
    async fn delete(&self, id: Uuid) -> DbResult<()>;
}

/// Create user input
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub is_seller: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
}

/// Role flag changes
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateRoles {
    pub is_seller: Option<bool>,
    pub is_staff: Option<bool>,
}

/// Super-administrator repository
#[async_trait]
pub trait SuperAdminRepository: Send + Sync {
    /// Find a super-admin by ID
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<SuperAdminRow>>;

    /// Find a super-admin by email
    async fn find_by_email(&self, email: &str) -> DbResult<Option<SuperAdminRow>>;

    /// List all super-admins
    async fn list(&self) -> DbResult<Vec<SuperAdminRow>>;

    /// Create the super-admin.
    ///
    /// Returns `Ok(None)` when one already exists; the check and the insert
    /// happen in one statement.
    async fn create_if_none(&self, admin: CreateSuperAdmin) -> DbResult<Option<SuperAdminRow>>;
}

/// Create super-admin input
#[derive(Debug, Clone)]
pub struct CreateSuperAdmin {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Store ownership lookups
#[async_trait]
pub trait StoreRepository: Send + Sync {
    /// Whether `owner_id` owns at least one store in `status`
    async fn owns_store_with_status(&self, owner_id: Uuid, status: StoreStatus) -> DbResult<bool>;

    /// Whether `owner_id` owns at least one active store
    async fn has_active_store(&self, owner_id: Uuid) -> DbResult<bool> {
        self.owns_store_with_status(owner_id, StoreStatus::Active).await
    }
}

/// Audit log repository
#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    /// Append an audit record
    async fn record(&self, entry: CreateAuditLog) -> DbResult<()>;
}

/// Create audit log input
#[derive(Debug, Clone)]
pub struct CreateAuditLog {
    pub subject_id: Option<Uuid>,
    pub domain: String,
    pub action: String,
    pub route: String,
    pub origin: String,
    pub ip_address: Option<String>,
    pub outcome: AuditOutcome,
    pub details: Option<serde_json::Value>,
}
