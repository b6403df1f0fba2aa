//! Auth service - ties together token handling, principal resolution, login and gating

use bazaar_db::{StoreRepository, SuperAdminRepository, UserRepository};
use bazaar_types::{Principal, TrustDomain};
use std::sync::Arc;

use crate::{
    account::AccountManager,
    audit::{LoginAudit, LoginMeta},
    config::AuthConfig,
    gate::CapabilityGate,
    resolver::PrincipalResolver,
    session::{Credential, IssuedSession, SessionIssuer},
    subject::SubjectStores,
    token::TokenCodec,
    LoginError,
};

/// Authentication service
///
/// Provides unified interface for:
/// - Principal resolution for each trust domain
/// - Login and token issuance
/// - Capability gating
/// - Account operations
pub struct AuthService<U: UserRepository, S: SuperAdminRepository> {
    codec: Arc<TokenCodec>,
    resolver: PrincipalResolver,
    issuer: SessionIssuer,
    gate: CapabilityGate,
    accounts: AccountManager<U, S>,
}

impl<U, S> AuthService<U, S>
where
    U: UserRepository + 'static,
    S: SuperAdminRepository + 'static,
{
    /// Create a new auth service
    pub fn new(
        config: AuthConfig,
        user_repo: Arc<U>,
        superadmin_repo: Arc<S>,
        store_repo: Arc<dyn StoreRepository>,
        audit: LoginAudit,
    ) -> Self {
        let codec = Arc::new(TokenCodec::new(config));
        let subjects =
            SubjectStores::from_repositories(Arc::clone(&user_repo), Arc::clone(&superadmin_repo));

        Self {
            resolver: PrincipalResolver::new(Arc::clone(&codec), subjects.clone()),
            issuer: SessionIssuer::new(Arc::clone(&codec), subjects, audit),
            gate: CapabilityGate::new(store_repo),
            accounts: AccountManager::new(user_repo, superadmin_repo),
            codec,
        }
    }

    /// Resolve a bearer token presented to `domain`; never fails
    pub async fn resolve(&self, token: Option<&str>, domain: TrustDomain) -> Principal {
        self.resolver.resolve_credential(token, domain).await
    }

    /// Authenticate and mint a token for `domain`
    pub async fn login(
        &self,
        credential: &Credential,
        domain: TrustDomain,
        meta: &LoginMeta,
    ) -> Result<IssuedSession, LoginError> {
        self.issuer.login(credential, domain, meta).await
    }

    pub fn resolver(&self) -> &PrincipalResolver {
        &self.resolver
    }

    pub fn gate(&self) -> &CapabilityGate {
        &self.gate
    }

    pub fn accounts(&self) -> &AccountManager<U, S> {
        &self.accounts
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }
}
