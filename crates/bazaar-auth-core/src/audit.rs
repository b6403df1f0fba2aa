//! Login audit trail

use bazaar_db::{AuditLogRepository, AuditOutcome, CreateAuditLog};
use bazaar_types::{SubjectId, TrustDomain};
use std::sync::Arc;

/// Client platform a login came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionOrigin {
    Web,
    Mobile,
}

impl ConnectionOrigin {
    /// Classify a `User-Agent` header value
    pub fn from_user_agent(user_agent: Option<&str>) -> Self {
        match user_agent {
            Some(ua) if ua.to_ascii_lowercase().contains("mobile") => Self::Mobile,
            _ => Self::Web,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::Mobile => "mobile",
        }
    }
}

/// Request facts recorded alongside a login attempt
#[derive(Debug, Clone, Default)]
pub struct LoginMeta {
    pub route: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

impl LoginMeta {
    pub fn origin(&self) -> ConnectionOrigin {
        ConnectionOrigin::from_user_agent(self.user_agent.as_deref())
    }
}

/// Appends login attempts to the audit log.
///
/// Write failures are logged and swallowed; they never fail a login.
#[derive(Clone, Default)]
pub struct LoginAudit {
    repo: Option<Arc<dyn AuditLogRepository>>,
}

impl LoginAudit {
    pub fn new(repo: Arc<dyn AuditLogRepository>) -> Self {
        Self { repo: Some(repo) }
    }

    /// An audit sink that only emits tracing events
    pub fn disabled() -> Self {
        Self { repo: None }
    }

    pub async fn record(
        &self,
        domain: TrustDomain,
        subject: Option<SubjectId>,
        meta: &LoginMeta,
        outcome: AuditOutcome,
        reason: Option<&str>,
    ) {
        let origin = meta.origin();
        match outcome {
            AuditOutcome::Success => tracing::info!(
                domain = %domain,
                origin = origin.as_str(),
                ip = meta.ip_address.as_deref().unwrap_or("-"),
                "Login succeeded"
            ),
            AuditOutcome::Failure => tracing::warn!(
                domain = %domain,
                origin = origin.as_str(),
                ip = meta.ip_address.as_deref().unwrap_or("-"),
                reason = reason.unwrap_or("-"),
                "Login failed"
            ),
        }

        let Some(repo) = &self.repo else {
            return;
        };

        let entry = CreateAuditLog {
            subject_id: subject.map(|id| id.0),
            domain: domain.to_string(),
            action: "LOGIN".to_string(),
            route: meta.route.clone(),
            origin: origin.as_str().to_string(),
            ip_address: meta.ip_address.clone(),
            outcome,
            details: reason.map(|r| serde_json::json!({ "reason": r })),
        };

        if let Err(e) = repo.record(entry).await {
            tracing::error!(domain = %domain, "Failed to write login audit record: {}", e);
        }
    }
}

impl std::fmt::Debug for LoginAudit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginAudit")
            .field("enabled", &self.repo.is_some())
            .finish()
    }
}
