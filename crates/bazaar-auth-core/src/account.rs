//! Account operations whose logic is authorization itself
//!
//! These bodies assume the caller already passed the capability gate; see
//! the operation table of the HTTP service for the requirement of each one.

use bazaar_db::{
    CreateSuperAdmin, CreateUser, DbError, SuperAdminRepository, UpdateRoles, UserRepository,
};
use bazaar_types::{Principal, RegularUser, SubjectId, SuperAdmin};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::password::{self, PasswordError};
use crate::subject::Subject;

/// Account operation failures
#[derive(Error, Debug)]
pub enum AccountError {
    /// Input rejected before touching the store
    #[error("{0}")]
    Validation(String),

    /// Old password did not match
    #[error("current password is incorrect")]
    WrongPassword,

    /// Email or username already taken
    #[error("{0} is already in use")]
    Duplicate(&'static str),

    /// Target account does not exist
    #[error("account not found")]
    NotFound,

    /// A super-admin already exists
    #[error("a super-admin already exists")]
    AlreadyBootstrapped,

    #[error("database error: {0}")]
    Database(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AccountError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) | Self::WrongPassword => 400,
            Self::NotFound => 404,
            Self::Duplicate(_) | Self::AlreadyBootstrapped => 409,
            Self::Database(_) | Self::Internal(_) => 500,
        }
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::WrongPassword => "WRONG_PASSWORD",
            Self::Duplicate(_) => "DUPLICATE",
            Self::NotFound => "NOT_FOUND",
            Self::AlreadyBootstrapped => "ALREADY_BOOTSTRAPPED",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<DbError> for AccountError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound => Self::NotFound,
            DbError::Duplicate(field) => Self::Duplicate(field),
            DbError::Sqlx(e) => {
                tracing::error!("Database error: {}", e);
                Self::Database(e.to_string())
            }
        }
    }
}

impl From<PasswordError> for AccountError {
    fn from(err: PasswordError) -> Self {
        match err {
            PasswordError::TooShort => Self::Validation(PasswordError::TooShort.to_string()),
            PasswordError::Hashing(msg) => Self::Internal(msg),
        }
    }
}

/// Self-service registration input
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub password: String,
}

/// Super-admin bootstrap input
#[derive(Debug, Clone)]
pub struct NewSuperAdmin {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Account operations over the user and super-admin repositories
pub struct AccountManager<U: UserRepository, S: SuperAdminRepository> {
    users: Arc<U>,
    superadmins: Arc<S>,
}

impl<U: UserRepository, S: SuperAdminRepository> AccountManager<U, S> {
    pub fn new(users: Arc<U>, superadmins: Arc<S>) -> Self {
        Self { users, superadmins }
    }

    /// Create a plain user (no seller, staff or superuser flag)
    pub async fn register(&self, input: NewUser) -> Result<RegularUser, AccountError> {
        let email = input.email.trim().to_lowercase();
        let username = input.username.trim().to_string();
        validate_identity(&email, &username)?;
        password::validate_new_password(&input.password)?;

        let password_hash = hash_blocking(input.password).await?;
        let row = self
            .users
            .create(CreateUser {
                id: Uuid::new_v4(),
                email,
                username,
                password_hash,
                is_seller: false,
                is_staff: false,
                is_superuser: false,
            })
            .await?;

        tracing::info!(user_id = %row.id, "Registered user");
        into_regular_user(Subject::from(row))
    }

    /// Turn on the seller flag. Idempotent.
    pub async fn activate_seller(&self, user_id: SubjectId) -> Result<RegularUser, AccountError> {
        let row = self
            .users
            .find_by_id(user_id.0)
            .await?
            .ok_or(AccountError::NotFound)?;
        if row.is_seller {
            return into_regular_user(Subject::from(row));
        }

        let row = self
            .users
            .update_roles(
                user_id.0,
                UpdateRoles {
                    is_seller: Some(true),
                    ..UpdateRoles::default()
                },
            )
            .await?;
        tracing::info!(user_id = %user_id, "Seller role activated");
        into_regular_user(Subject::from(row))
    }

    /// Change a password, proving knowledge of the current one.
    ///
    /// Required even when staff change another user's password.
    pub async fn change_password(
        &self,
        user_id: SubjectId,
        current: &str,
        new: &str,
    ) -> Result<(), AccountError> {
        let row = self
            .users
            .find_by_id(user_id.0)
            .await?
            .ok_or(AccountError::NotFound)?;
        password::validate_new_password(new)?;

        let stored = row.password_hash;
        let current = current.to_string();
        let matches =
            tokio::task::spawn_blocking(move || password::verify_password(&stored, &current))
                .await
                .map_err(|e| AccountError::Internal(e.to_string()))?;
        if !matches {
            return Err(AccountError::WrongPassword);
        }

        self.store_password(user_id, new).await
    }

    async fn store_password(&self, user_id: SubjectId, new: &str) -> Result<(), AccountError> {
        let password_hash = hash_blocking(new.to_string()).await?;
        self.users.update_password(user_id.0, &password_hash).await?;
        tracing::info!(user_id = %user_id, "Password changed");
        Ok(())
    }

    /// Set the staff and/or seller flags of a user
    pub async fn set_roles(
        &self,
        user_id: SubjectId,
        roles: UpdateRoles,
    ) -> Result<RegularUser, AccountError> {
        let row = self.users.update_roles(user_id.0, roles).await?;
        tracing::info!(
            user_id = %user_id,
            is_staff = row.is_staff,
            is_seller = row.is_seller,
            "User roles updated"
        );
        into_regular_user(Subject::from(row))
    }

    /// Create the super-admin if there is none yet
    pub async fn bootstrap_superadmin(
        &self,
        input: NewSuperAdmin,
    ) -> Result<SuperAdmin, AccountError> {
        let email = input.email.trim().to_lowercase();
        let username = input.username.trim().to_string();
        validate_identity(&email, &username)?;
        password::validate_new_password(&input.password)?;

        let password_hash = hash_blocking(input.password).await?;
        let row = self
            .superadmins
            .create_if_none(CreateSuperAdmin {
                id: Uuid::new_v4(),
                username,
                email,
                password_hash,
            })
            .await?
            .ok_or(AccountError::AlreadyBootstrapped)?;

        tracing::info!(superadmin_id = %row.id, "Super-admin created");
        match Subject::from(row).principal {
            Principal::SuperAdmin(admin) => Ok(admin),
            _ => Err(AccountError::Internal("unexpected principal kind".into())),
        }
    }

    pub async fn list_superadmins(&self) -> Result<Vec<SuperAdmin>, AccountError> {
        let rows = self.superadmins.list().await?;
        Ok(rows
            .into_iter()
            .filter_map(|row| match Subject::from(row).principal {
                Principal::SuperAdmin(admin) => Some(admin),
                _ => None,
            })
            .collect())
    }
}

impl<U: UserRepository, S: SuperAdminRepository> Clone for AccountManager<U, S> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            superadmins: Arc::clone(&self.superadmins),
        }
    }
}

fn validate_identity(email: &str, username: &str) -> Result<(), AccountError> {
    let valid_email = email
        .split_once('@')
        .is_some_and(|(local, host)| !local.is_empty() && host.contains('.'));
    if !valid_email {
        return Err(AccountError::Validation("a valid email is required".into()));
    }
    if username.is_empty() {
        return Err(AccountError::Validation("username is required".into()));
    }
    Ok(())
}

async fn hash_blocking(raw: String) -> Result<String, AccountError> {
    let hash = tokio::task::spawn_blocking(move || password::hash_password(&raw))
        .await
        .map_err(|e| AccountError::Internal(e.to_string()))??;
    Ok(hash)
}

fn into_regular_user(subject: Subject) -> Result<RegularUser, AccountError> {
    match subject.principal {
        Principal::RegularUser(user) => Ok(user),
        _ => Err(AccountError::Internal("unexpected principal kind".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_validation() {
        assert!(validate_identity("ana@example.com", "ana").is_ok());
        assert!(validate_identity("ana.example.com", "ana").is_err());
        assert!(validate_identity("@example.com", "ana").is_err());
        assert!(validate_identity("ana@localhost", "ana").is_err());
        assert!(validate_identity("ana@example.com", "").is_err());
    }

    #[test]
    fn test_db_errors_map_to_account_errors() {
        assert!(matches!(
            AccountError::from(DbError::Duplicate("email")),
            AccountError::Duplicate("email")
        ));
        assert!(matches!(
            AccountError::from(DbError::NotFound),
            AccountError::NotFound
        ));
        assert_eq!(AccountError::AlreadyBootstrapped.status_code(), 409);
    }

    #[test]
    fn test_short_password_is_validation_error() {
        let err = AccountError::from(PasswordError::TooShort);
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }
}
