//! Resolved principal types

use serde::{Deserialize, Serialize};

use crate::SubjectId;

/// Role flags of a regular user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Roles {
    pub is_seller: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
}

impl Roles {
    /// Staff back-office access (`is_staff` or `is_superuser`)
    pub const fn is_admin(&self) -> bool {
        self.is_staff || self.is_superuser
    }
}

/// A regular marketplace user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegularUser {
    pub id: SubjectId,
    pub email: String,
    pub username: String,
    pub roles: Roles,
}

/// The super-administrator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuperAdmin {
    pub id: SubjectId,
    pub username: String,
    pub email: String,
}

/// Who is calling.
///
/// Exactly one variant is active per request. Variants are never converted
/// into one another.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Principal {
    /// Authenticated regular user (user or admin domain)
    RegularUser(RegularUser),
    /// Authenticated super-administrator
    SuperAdmin(SuperAdmin),
    /// No usable credential
    #[default]
    Anonymous,
}

impl Principal {
    /// Identity reference, `None` for anonymous callers
    pub fn id(&self) -> Option<SubjectId> {
        match self {
            Self::RegularUser(user) => Some(user.id),
            Self::SuperAdmin(admin) => Some(admin.id),
            Self::Anonymous => None,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Self::Anonymous)
    }

    /// The regular user, if that is who is calling
    pub fn as_user(&self) -> Option<&RegularUser> {
        match self {
            Self::RegularUser(user) => Some(user),
            _ => None,
        }
    }

    /// Short kind label for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::RegularUser(_) => "user",
            Self::SuperAdmin(_) => "superadmin",
            Self::Anonymous => "anonymous",
        }
    }

    /// Public summary returned by login and `me` operations
    pub fn summary(&self) -> Option<PrincipalSummary> {
        match self {
            Self::RegularUser(user) => Some(PrincipalSummary {
                id: user.id,
                kind: PrincipalKind::User,
                email: user.email.clone(),
                username: user.username.clone(),
                roles: Some(user.roles),
            }),
            Self::SuperAdmin(admin) => Some(PrincipalSummary {
                id: admin.id,
                kind: PrincipalKind::SuperAdmin,
                email: admin.email.clone(),
                username: admin.username.clone(),
                roles: None,
            }),
            Self::Anonymous => None,
        }
    }
}

/// Kind tag used in summaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrincipalKind {
    User,
    SuperAdmin,
}

/// Principal summary for API responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrincipalSummary {
    pub id: SubjectId,
    pub kind: PrincipalKind,
    pub email: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Roles>,
}
