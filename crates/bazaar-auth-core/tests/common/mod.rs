//! Common test utilities for bazaar-auth-core integration tests

pub mod fixtures;
pub mod mock_repos;

#[allow(unused_imports)]
pub use fixtures::{test_config, TestEnv};
#[allow(unused_imports)]
pub use mock_repos::{
    MockAuditLogRepository, MockStoreRepository, MockSuperAdminRepository, MockUserRepository,
};
