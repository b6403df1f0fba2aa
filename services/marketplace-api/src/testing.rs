//! In-memory repositories for router tests

use std::sync::Arc;

use async_trait::async_trait;
use bazaar_auth_core::{AuthConfig, AuthService, LoginAudit, SigningKey, SigningKeys};
use bazaar_db::{
    CreateSuperAdmin, CreateUser, DbError, DbResult, StoreRepository, StoreStatus,
    SuperAdminRepository, SuperAdminRow, UpdateRoles, UserRepository, UserRow,
};
use chrono::Utc;
use dashmap::DashMap;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use crate::state::AppState;

#[derive(Default, Clone)]
pub struct MemoryUsers {
    users: Arc<DashMap<Uuid, UserRow>>,
}

impl MemoryUsers {
    /// Store an active user with the given password and flags
    pub fn add(&self, email: &str, password: &str, is_seller: bool, is_staff: bool) -> UserRow {
        let id = Uuid::new_v4();
        let row = UserRow {
            id,
            email: email.to_string(),
            username: format!("user-{id}"),
            password_hash: bazaar_auth_core::hash_password(password).unwrap(),
            is_seller,
            is_staff,
            is_superuser: false,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.users.insert(id, row.clone());
        row
    }

    pub fn get(&self, id: Uuid) -> Option<UserRow> {
        self.users.get(&id).map(|r| r.value().clone())
    }
}

#[async_trait]
impl UserRepository for MemoryUsers {
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<UserRow>> {
        Ok(self.get(id))
    }

    async fn find_by_email(&self, email: &str) -> DbResult<Option<UserRow>> {
        Ok(self
            .users
            .iter()
            .find(|r| r.email.to_lowercase() == email.to_lowercase())
            .map(|r| r.value().clone()))
    }

    async fn create(&self, user: CreateUser) -> DbResult<UserRow> {
        if self.find_by_email(&user.email).await?.is_some() {
            return Err(DbError::Duplicate("email"));
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
        self.users.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> DbResult<()> {
        let mut user = self.users.get_mut(&id).ok_or(DbError::NotFound)?;
        user.password_hash = password_hash.to_string();
        Ok(())
    }

    async fn update_roles(&self, id: Uuid, roles: UpdateRoles) -> DbResult<UserRow> {
        let mut user = self.users.get_mut(&id).ok_or(DbError::NotFound)?;
        if let Some(is_seller) = roles.is_seller {
            user.is_seller = is_seller;
        }
        if let Some(is_staff) = roles.is_staff {
            user.is_staff = is_staff;
        }
        Ok(user.clone())
    }

    async fn delete(&self, id: Uuid) -> DbResult<()> {
        self.users.remove(&id);
        Ok(())
    }
}

#[derive(Default, Clone)]
pub struct MemorySuperAdmins {
    admins: Arc<DashMap<Uuid, SuperAdminRow>>,
}

#[async_trait]
impl SuperAdminRepository for MemorySuperAdmins {
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

struct NoStores;

#[async_trait]
impl StoreRepository for NoStores {
    async fn owns_store_with_status(&self, _: Uuid, _: StoreStatus) -> DbResult<bool> {
        Ok(false)
    }
}

/// Router state over in-memory repositories; the pool never connects
pub fn memory_state() -> (AppState<MemoryUsers, MemorySuperAdmins>, MemoryUsers) {
    let users = MemoryUsers::default();
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://bazaar@localhost/bazaar")
        .unwrap();
    let auth = AuthService::new(
        test_auth_config(),
        Arc::new(users.clone()),
        Arc::new(MemorySuperAdmins::default()),
        Arc::new(NoStores),
        LoginAudit::disabled(),
    );
    (AppState::new(auth, pool), users)
}

pub fn test_auth_config() -> AuthConfig {
    AuthConfig::new(SigningKeys::new(
        SigningKey::new([1u8; 32]).unwrap(),
        SigningKey::new([2u8; 32]).unwrap(),
        SigningKey::new([3u8; 32]).unwrap(),
    ))
}
