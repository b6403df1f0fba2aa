//! Login flow

use bazaar_db::AuditOutcome;
use bazaar_types::{PrincipalSummary, TrustDomain};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

use crate::audit::{LoginAudit, LoginMeta};
use crate::gate::Capability;
use crate::password;
use crate::subject::SubjectStores;
use crate::token::TokenCodec;
use crate::LoginError;

/// Login input
#[derive(Clone)]
pub struct Credential {
    /// Email address of the account
    pub identifier: String,
    pub password: String,
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("identifier", &self.identifier)
            .field("password", &"[redacted]")
            .finish()
    }
}

/// Result of a successful login
#[derive(Debug, Clone, Serialize)]
pub struct IssuedSession {
    pub token: String,
    pub domain: TrustDomain,
    pub expires_at: DateTime<Utc>,
    pub principal: PrincipalSummary,
}

/// Authenticates credentials and mints domain-scoped tokens.
///
/// Stateless: nothing is stored server-side beyond the audit record.
#[derive(Debug, Clone)]
pub struct SessionIssuer {
    codec: Arc<TokenCodec>,
    stores: SubjectStores,
    audit: LoginAudit,
}

impl SessionIssuer {
    pub fn new(codec: Arc<TokenCodec>, stores: SubjectStores, audit: LoginAudit) -> Self {
        Self {
            codec,
            stores,
            audit,
        }
    }

    /// Log in to `domain`.
    ///
    /// Unknown, inactive and wrong-password accounts are all reported as
    /// [`LoginError::InvalidCredentials`], and all of them pay for one Argon2
    /// verification. The admin domain additionally
    /// requires the subject to already be staff or superuser.
    pub async fn login(
        &self,
        credential: &Credential,
        domain: TrustDomain,
        meta: &LoginMeta,
    ) -> Result<IssuedSession, LoginError> {
        let store = self.stores.for_domain(domain);
        // Case folding is the store's job
        let identifier = credential.identifier.trim();

        let Some(subject) = store.find_by_login(identifier).await? else {
            let raw = credential.password.clone();
            tokio::task::spawn_blocking(move || password::verify_dummy_password(&raw))
                .await
                .map_err(|e| LoginError::Internal(format!("password verification task: {e}")))?;
            self.audit
                .record(domain, None, meta, AuditOutcome::Failure, Some("unknown account"))
                .await;
            return Err(LoginError::InvalidCredentials);
        };
        let subject_id = subject.principal.id();

        // Argon2 is CPU-bound
        let verified = {
            let store = Arc::clone(store);
            let candidate = subject.clone();
            let raw = credential.password.clone();
            tokio::task::spawn_blocking(move || store.verify_password(&candidate, &raw))
                .await
                .map_err(|e| LoginError::Internal(format!("password verification task: {e}")))?
        };
        if !verified {
            self.audit
                .record(domain, subject_id, meta, AuditOutcome::Failure, Some("wrong password"))
                .await;
            return Err(LoginError::InvalidCredentials);
        }

        if domain == TrustDomain::Admin
            && Capability::StaffOrSuper
                .check_principal(&subject.principal)
                .is_err()
        {
            self.audit
                .record(domain, subject_id, meta, AuditOutcome::Failure, Some("insufficient role"))
                .await;
            return Err(LoginError::InsufficientRole);
        }

        let issued = self
            .codec
            .issue_at(&subject.principal, domain, Utc::now())
            .map_err(|e| LoginError::Internal(e.to_string()))?;
        let principal = subject
            .principal
            .summary()
            .ok_or_else(|| LoginError::Internal("store returned an anonymous subject".into()))?;

        self.audit
            .record(domain, subject_id, meta, AuditOutcome::Success, None)
            .await;

        Ok(IssuedSession {
            token: issued.token,
            domain,
            expires_at: issued.expires_at,
            principal,
        })
    }
}
