//! Configuration for the marketplace API service.

use bazaar_auth_core::{AuthConfig, SigningKey, SigningKeys};
use bazaar_db::PoolOptions;
use bazaar_types::TrustDomain;
use std::time::Duration;

/// Marketplace API configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub http_port: u16,

    /// Database URL
    pub database_url: String,

    /// Database pool sizing
    pub pool: PoolOptions,

    /// Auth core configuration
    pub auth: AuthConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Database
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let max_connections = lookup("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|| "10".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("DATABASE_MAX_CONNECTIONS"))?;

        // Server port
        let http_port = lookup("HTTP_PORT")
            .unwrap_or_else(|| "8080".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("HTTP_PORT"))?;

        // Signing keys, one per trust domain
        let fallback = lookup("JWT_SECRET");
        let key_for = |domain: TrustDomain| -> Result<SigningKey, ConfigError> {
            let var = secret_var(domain);
            let secret = match lookup(var) {
                Some(secret) => secret,
                None => {
                    let shared = fallback.clone().ok_or(ConfigError::Missing(var))?;
                    tracing::warn!(
                        domain = %domain,
                        "{} not set, falling back to JWT_SECRET",
                        var
                    );
                    shared
                }
            };
            SigningKey::new(secret).map_err(|e| ConfigError::AuthConfig(format!("{var}: {e}")))
        };
        let keys = SigningKeys::new(
            key_for(TrustDomain::User)?,
            key_for(TrustDomain::Admin)?,
            key_for(TrustDomain::SuperAdmin)?,
        );
        for (a, b) in keys.shared_pairs() {
            tracing::warn!(
                "Trust domains {} and {} share a signing key; a leak of one forges the other",
                a,
                b
            );
        }

        // Token lifetimes
        let mut auth = AuthConfig::new(keys);
        for domain in TrustDomain::ALL {
            let var = ttl_var(domain);
            if let Some(raw) = lookup(var) {
                let hours: u64 = raw.parse().map_err(|_| ConfigError::Invalid(var))?;
                if hours == 0 {
                    return Err(ConfigError::Invalid(var));
                }
                auth = auth.with_token_ttl(domain, Duration::from_secs(hours * 3600));
            }
        }

        Ok(Self {
            http_port,
            database_url,
            pool: PoolOptions {
                max_connections,
                ..PoolOptions::default()
            },
            auth,
        })
    }
}

fn secret_var(domain: TrustDomain) -> &'static str {
    match domain {
        TrustDomain::User => "USER_JWT_SECRET",
        TrustDomain::Admin => "ADMIN_JWT_SECRET",
        TrustDomain::SuperAdmin => "SUPERADMIN_JWT_SECRET",
    }
}

fn ttl_var(domain: TrustDomain) -> &'static str {
    match domain {
        TrustDomain::User => "USER_TOKEN_TTL_HOURS",
        TrustDomain::Admin => "ADMIN_TOKEN_TTL_HOURS",
        TrustDomain::SuperAdmin => "SUPERADMIN_TOKEN_TTL_HOURS",
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),

    #[error("Auth config error: {0}")]
    AuthConfig(String),
}
