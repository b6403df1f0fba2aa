//! Shared service wiring for integration tests

use bazaar_auth_core::{AuthConfig, AuthService, LoginAudit, SigningKey, SigningKeys};
use std::sync::Arc;

use super::mock_repos::{
    MockAuditLogRepository, MockStoreRepository, MockSuperAdminRepository, MockUserRepository,
};

/// Independent keys per domain
pub fn test_config() -> AuthConfig {
    AuthConfig::new(SigningKeys::new(
        SigningKey::new([0x11u8; 32]).unwrap(),
        SigningKey::new([0x22u8; 32]).unwrap(),
        SigningKey::new([0x33u8; 32]).unwrap(),
    ))
}

/// A service over in-memory repositories, with handles to each repository
pub struct TestEnv {
    pub users: Arc<MockUserRepository>,
    pub superadmins: Arc<MockSuperAdminRepository>,
    pub stores: Arc<MockStoreRepository>,
    pub audit: Arc<MockAuditLogRepository>,
    pub service: AuthService<MockUserRepository, MockSuperAdminRepository>,
}

impl TestEnv {
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    pub fn with_config(config: AuthConfig) -> Self {
        let users = Arc::new(MockUserRepository::new());
        let superadmins = Arc::new(MockSuperAdminRepository::new());
        let stores = Arc::new(MockStoreRepository::new());
        let audit = Arc::new(MockAuditLogRepository::new());

        let service = AuthService::new(
            config,
            Arc::clone(&users),
            Arc::clone(&superadmins),
            stores.clone(),
            LoginAudit::new(audit.clone()),
        );

        Self {
            users,
            superadmins,
            stores,
            audit,
            service,
        }
    }
}
