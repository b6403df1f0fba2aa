//! Configuration types for the auth layer

use bazaar_types::TrustDomain;
use std::time::Duration;

use crate::crypto::SigningKeys;

/// Auth configuration.
///
/// Built once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Signing key per trust domain
    pub keys: SigningKeys,
    /// Token lifetime for regular users
    pub user_token_ttl: Duration,
    /// Token lifetime for the staff back office
    pub admin_token_ttl: Duration,
    /// Token lifetime for the super-administrator
    pub superadmin_token_ttl: Duration,
}

impl AuthConfig {
    /// Create a config with default lifetimes (24h, 24h, 8h)
    pub fn new(keys: SigningKeys) -> Self {
        Self {
            keys,
            user_token_ttl: hours(TrustDomain::User.default_ttl_hours()),
            admin_token_ttl: hours(TrustDomain::Admin.default_ttl_hours()),
            superadmin_token_ttl: hours(TrustDomain::SuperAdmin.default_ttl_hours()),
        }
    }

    /// Token lifetime for a domain
    pub fn token_ttl(&self, domain: TrustDomain) -> Duration {
        match domain {
            TrustDomain::User => self.user_token_ttl,
            TrustDomain::Admin => self.admin_token_ttl,
            TrustDomain::SuperAdmin => self.superadmin_token_ttl,
        }
    }

    /// Set the token lifetime for a domain
    pub fn with_token_ttl(mut self, domain: TrustDomain, ttl: Duration) -> Self {
        match domain {
            TrustDomain::User => self.user_token_ttl = ttl,
            TrustDomain::Admin => self.admin_token_ttl = ttl,
            TrustDomain::SuperAdmin => self.superadmin_token_ttl = ttl,
        }
        self
    }
}

fn hours(h: u32) -> Duration {
    Duration::from_secs(u64::from(h) * 60 * 60)
}
