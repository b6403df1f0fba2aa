//! Request-scoped authentication context.

use bazaar_types::{Principal, TrustDomain};

/// Who is calling, and through which trust domain.
///
/// Built once by the [`PrincipalLayer`](crate::PrincipalLayer) and never
/// mutated afterwards; handlers receive their own copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    domain: TrustDomain,
    principal: Principal,
}

impl RequestContext {
    #[must_use]
    pub fn new(domain: TrustDomain, principal: Principal) -> Self {
        Self { domain, principal }
    }

    /// Context for a caller without a usable credential.
    #[must_use]
    pub fn anonymous(domain: TrustDomain) -> Self {
        Self::new(domain, Principal::Anonymous)
    }

    #[must_use]
    pub fn domain(&self) -> TrustDomain {
        self.domain
    }

    #[must_use]
    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    #[must_use]
    pub fn into_principal(self) -> Principal {
        self.principal
    }
}
