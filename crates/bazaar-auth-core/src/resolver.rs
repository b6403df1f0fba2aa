//! Bearer token to principal resolution

use bazaar_types::{Principal, TrustDomain};
use std::sync::Arc;

use crate::subject::SubjectStores;
use crate::token::TokenCodec;

/// Resolves bearer tokens to principals.
///
/// Every failure (bad signature, expiry, wrong domain, unknown or inactive
/// subject, store outage) yields [`Principal::Anonymous`]. Nothing is cached:
/// each call reads the subject store again so role changes and deletions
/// take effect on the very next request.
#[derive(Debug, Clone)]
pub struct PrincipalResolver {
    codec: Arc<TokenCodec>,
    stores: SubjectStores,
}

impl PrincipalResolver {
    pub fn new(codec: Arc<TokenCodec>, stores: SubjectStores) -> Self {
        Self { codec, stores }
    }

    /// Resolve `token` presented to an endpoint of `domain`
    pub async fn resolve(&self, token: &str, domain: TrustDomain) -> Principal {
        let claims = match self.codec.decode(token, domain) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::debug!(domain = %domain, reason = %e, "Treating caller as anonymous");
                return Principal::Anonymous;
            }
        };

        let subject_id = claims.subject();
        let store = self.stores.for_domain(domain);
        match store.find_by_identity(subject_id).await {
            Ok(Some(subject)) => subject.principal,
            Ok(None) => {
                tracing::debug!(
                    domain = %domain,
                    subject = %subject_id,
                    "Token subject not found, treating caller as anonymous"
                );
                Principal::Anonymous
            }
            Err(e) => {
                tracing::error!(domain = %domain, "Subject lookup failed: {}", e);
                Principal::Anonymous
            }
        }
    }

    /// Resolve an optional credential; `None` is anonymous without a decode attempt
    pub async fn resolve_credential(&self, token: Option<&str>, domain: TrustDomain) -> Principal {
        match token {
            Some(token) => self.resolve(token, domain).await,
            None => Principal::Anonymous,
        }
    }
}
