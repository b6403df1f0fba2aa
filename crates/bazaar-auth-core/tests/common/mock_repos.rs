//! Mock repositories for testing

use async_trait::async_trait;
use bazaar_db::{
    AuditLogRepository, CreateAuditLog, CreateSuperAdmin, CreateUser, DbError, DbResult,
    StoreRepository, StoreStatus, SuperAdminRepository, SuperAdminRow, UpdateRoles,
    UserRepository, UserRow,
};
use chrono::Utc;
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// In-memory user repository for testing
#[derive(Default, Clone)]
pub struct MockUserRepository {
    users: Arc<DashMap<Uuid, UserRow>>,
    // Keyed by lowercased email, like the `lower(email)` index
    by_email: Arc<DashMap<String, Uuid>>,
    failing: Arc<AtomicBool>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a test user directly
    pub fn insert_user(&self, user: UserRow) {
        self.by_email.insert(user.email.to_lowercase(), user.id);
        self.users.insert(user.id, user);
    }

    /// Build a user row with the given password and flags
    #[allow(dead_code)]
    pub fn create_test_user(password: &str, is_seller: bool, is_staff: bool, is_superuser: bool) -> UserRow {
        let id = Uuid::new_v4();
        UserRow {
            id,
            email: format!("user-{id}@example.com"),
            username: format!("user-{id}"),
            password_hash: bazaar_auth_core::hash_password(password).unwrap(),
            is_seller,
            is_staff,
            is_superuser,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    /// Flip `is_active` on a stored user
    #[allow(dead_code)]
    pub fn set_active(&self, id: Uuid, active: bool) {
        if let Some(mut user) = self.users.get_mut(&id) {
            user.is_active = active;
        }
    }

    /// Make every call fail as if the database were down
    #[allow(dead_code)]
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> DbResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DbError::Sqlx(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.users.len()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<UserRow>> {
        self.check()?;
        Ok(self.users.get(&id).map(|r| r.value().clone()))
    }

    async fn find_by_email(&self, email: &str) -> DbResult<Option<UserRow>> {
        self.check()?;
        Ok(self
            .by_email
            .get(&email.to_lowercase())
            .and_then(|id| self.users.get(id.value()).map(|r| r.value().clone())))
    }

    async fn create(&self, user: CreateUser) -> DbResult<UserRow> {
        self.check()?;
        if self.by_email.contains_key(&user.email.to_lowercase()) {
            return Err(DbError::Duplicate("email"));
        }
        if self.users.iter().any(|u| u.username == user.username) {
            return Err(DbError::Duplicate("username"));
        }
        let row = UserRow {
            id: user.id,
            email: user.email,
            username: user.username,
            password_hash: user.password_hash,
            is_seller: user.is_seller,
            is_staff: user.is_staff,
            is_superuser: user.is_superuser,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.insert_user(row.clone());
        Ok(row)
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> DbResult<()> {
        self.check()?;
        let mut user = self.users.get_mut(&id).ok_or(DbError::NotFound)?;
        user.password_hash = password_hash.to_string();
        user.updated_at = Utc::now();
        Ok(())
    }

    async fn update_roles(&self, id: Uuid, roles: UpdateRoles) -> DbResult<UserRow> {
        self.check()?;
        let mut user = self.users.get_mut(&id).ok_or(DbError::NotFound)?;
        if let Some(is_seller) = roles.is_seller {
            user.is_seller = is_seller;
        }
        if let Some(is_staff) = roles.is_staff {
            user.is_staff = is_staff;
        }
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn delete(&self, id: Uuid) -> DbResult<()> {
        self.check()?;
        // Remove from main store and clean up indices
        if let Some((_, user)) = self.users.remove(&id) {
            self.by_email.remove(&user.email.to_lowercase());
        }
        Ok(())
    }
}

/// In-memory super-admin repository for testing
#[derive(Default, Clone)]
pub struct MockSuperAdminRepository {
    admins: Arc<DashMap<Uuid, SuperAdminRow>>,
    // Serializes create_if_none the way the singleton index does
    create_lock: Arc<Mutex<()>>,
}

impl MockSuperAdminRepository {
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(dead_code)]
    pub fn insert_admin(&self, admin: SuperAdminRow) {
        self.admins.insert(admin.id, admin);
    }

    /// Build a super-admin row with the given password
    #[allow(dead_code)]
    pub fn create_test_admin(password: &str) -> SuperAdminRow {
        let id = Uuid::new_v4();
        SuperAdminRow {
            id,
            username: format!("root-{id}"),
            email: format!("root-{id}@example.com"),
            password_hash: bazaar_auth_core::hash_password(password).unwrap(),
            created_at: Utc::now(),
        }
    }
}

#[async_trait]
impl SuperAdminRepository for MockSuperAdminRepository {
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<SuperAdminRow>> {
        Ok(self.admins.get(&id).map(|r| r.value().clone()))
    }

    async fn find_by_email(&self, email: &str) -> DbResult<Option<SuperAdminRow>> {
        Ok(self
            .admins
            .iter()
            .find(|r| r.email.eq_ignore_ascii_case(email))
            .map(|r| r.value().clone()))
    }

    async fn list(&self) -> DbResult<Vec<SuperAdminRow>> {
        Ok(self.admins.iter().map(|r| r.value().clone()).collect())
    }

    async fn create_if_none(&self, admin: CreateSuperAdmin) -> DbResult<Option<SuperAdminRow>> {
        let _guard = self.create_lock.lock().unwrap();
        if !self.admins.is_empty() {
            return Ok(None);
        }
        let row = SuperAdminRow {
            id: admin.id,
            username: admin.username,
            email: admin.email,
            password_hash: admin.password_hash,
            created_at: Utc::now(),
        };
        self.admins.insert(row.id, row.clone());
        Ok(Some(row))
    }
}

/// In-memory store ownership for testing
#[derive(Default, Clone)]
pub struct MockStoreRepository {
    stores: Arc<DashMap<Uuid, Vec<StoreStatus>>>,
}

impl MockStoreRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a store owned by `owner_id`
    #[allow(dead_code)]
    pub fn add_store(&self, owner_id: Uuid, status: StoreStatus) {
        self.stores.entry(owner_id).or_default().push(status);
    }
}

#[async_trait]
impl StoreRepository for MockStoreRepository {
    async fn owns_store_with_status(&self, owner_id: Uuid, status: StoreStatus) -> DbResult<bool> {
        Ok(self
            .stores
            .get(&owner_id)
            .is_some_and(|s| s.contains(&status)))
    }
}

/// Audit repository that keeps every record
#[derive(Default, Clone)]
pub struct MockAuditLogRepository {
    entries: Arc<Mutex<Vec<CreateAuditLog>>>,
    failing: Arc<AtomicBool>,
}

impl MockAuditLogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(dead_code)]
    pub fn entries(&self) -> Vec<CreateAuditLog> {
        self.entries.lock().unwrap().clone()
    }

    #[allow(dead_code)]
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl AuditLogRepository for MockAuditLogRepository {
    async fn record(&self, entry: CreateAuditLog) -> DbResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DbError::Sqlx(sqlx::Error::PoolTimedOut));
        }
        self.entries.lock().unwrap().push(entry);
        Ok(())
    }
}
