//! Subject stores
//!
//! The resolver and the session issuer only see subjects through
//! [`SubjectStore`]. Each trust domain gets its own store instance, so a
//! lookup can never wander into another domain's records.

use async_trait::async_trait;
use bazaar_db::{DbResult, SuperAdminRepository, SuperAdminRow, UserRepository, UserRow};
use bazaar_types::{Principal, RegularUser, Roles, SubjectId, SuperAdmin, TrustDomain};
use std::sync::Arc;

use crate::password;

/// A stored subject: the principal it resolves to plus its credential
#[derive(Debug, Clone)]
pub struct Subject {
    pub principal: Principal,
    pub password_hash: String,
}

/// Per-domain subject lookups
#[async_trait]
pub trait SubjectStore: Send + Sync {
    /// The domain this store serves
    fn domain(&self) -> TrustDomain;

    /// Look up a subject by identity reference. Inactive subjects are not found.
    async fn find_by_identity(&self, id: SubjectId) -> DbResult<Option<Subject>>;

    /// Look up a subject by login identifier (email, case-insensitive).
    /// Inactive subjects are not found.
    async fn find_by_login(&self, identifier: &str) -> DbResult<Option<Subject>>;

    /// Check a raw password against the subject's stored hash
    fn verify_password(&self, subject: &Subject, raw: &str) -> bool {
        password::verify_password(&subject.password_hash, raw)
    }
}

/// Regular users, serving either the user or the admin domain
pub struct UserSubjects<R: UserRepository> {
    domain: TrustDomain,
    repo: Arc<R>,
}

impl<R: UserRepository> UserSubjects<R> {
    /// Store for the user domain
    pub fn for_users(repo: Arc<R>) -> Self {
        Self {
            domain: TrustDomain::User,
            repo,
        }
    }

    /// Store for the admin domain
    pub fn for_admins(repo: Arc<R>) -> Self {
        Self {
            domain: TrustDomain::Admin,
            repo,
        }
    }
}

impl From<UserRow> for Subject {
    fn from(row: UserRow) -> Self {
        Self {
            principal: Principal::RegularUser(RegularUser {
                id: SubjectId(row.id),
                email: row.email,
                username: row.username,
                roles: Roles {
                    is_seller: row.is_seller,
                    is_staff: row.is_staff,
                    is_superuser: row.is_superuser,
                },
            }),
            password_hash: row.password_hash,
        }
    }
}

#[async_trait]
impl<R: UserRepository> SubjectStore for UserSubjects<R> {
    fn domain(&self) -> TrustDomain {
        self.domain
    }

    async fn find_by_identity(&self, id: SubjectId) -> DbResult<Option<Subject>> {
        let row = self.repo.find_by_id(id.0).await?;
        Ok(row.filter(|r| r.is_active).map(Subject::from))
    }

    async fn find_by_login(&self, identifier: &str) -> DbResult<Option<Subject>> {
        let row = self.repo.find_by_email(identifier).await?;
        Ok(row.filter(|r| r.is_active).map(Subject::from))
    }
}

/// The super-admin credential store
pub struct SuperAdminSubjects<R: SuperAdminRepository> {
    repo: Arc<R>,
}

impl<R: SuperAdminRepository> SuperAdminSubjects<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

impl From<SuperAdminRow> for Subject {
    fn from(row: SuperAdminRow) -> Self {
        Self {
            principal: Principal::SuperAdmin(SuperAdmin {
                id: SubjectId(row.id),
                username: row.username,
                email: row.email,
            }),
            password_hash: row.password_hash,
        }
    }
}

#[async_trait]
impl<R: SuperAdminRepository> SubjectStore for SuperAdminSubjects<R> {
    fn domain(&self) -> TrustDomain {
        TrustDomain::SuperAdmin
    }

    async fn find_by_identity(&self, id: SubjectId) -> DbResult<Option<Subject>> {
        Ok(self.repo.find_by_id(id.0).await?.map(Subject::from))
    }

    async fn find_by_login(&self, identifier: &str) -> DbResult<Option<Subject>> {
        Ok(self.repo.find_by_email(identifier).await?.map(Subject::from))
    }
}

/// One store per trust domain
#[derive(Clone)]
pub struct SubjectStores {
    user: Arc<dyn SubjectStore>,
    admin: Arc<dyn SubjectStore>,
    superadmin: Arc<dyn SubjectStore>,
}

impl SubjectStores {
    /// Bundle the three stores.
    ///
    /// # Panics
    /// Panics if a store is passed in the slot of a different domain; this is
    /// a wiring mistake caught at startup.
    pub fn new(
        user: Arc<dyn SubjectStore>,
        admin: Arc<dyn SubjectStore>,
        superadmin: Arc<dyn SubjectStore>,
    ) -> Self {
        assert_eq!(user.domain(), TrustDomain::User, "user store slot");
        assert_eq!(admin.domain(), TrustDomain::Admin, "admin store slot");
        assert_eq!(
            superadmin.domain(),
            TrustDomain::SuperAdmin,
            "superadmin store slot"
        );
        Self {
            user,
            admin,
            superadmin,
        }
    }

    /// Standard wiring over a user repository and a super-admin repository
    pub fn from_repositories<U, S>(users: Arc<U>, superadmins: Arc<S>) -> Self
    where
        U: UserRepository + 'static,
        S: SuperAdminRepository + 'static,
    {
        Self::new(
            Arc::new(UserSubjects::for_users(Arc::clone(&users))),
            Arc::new(UserSubjects::for_admins(users)),
            Arc::new(SuperAdminSubjects::new(superadmins)),
        )
    }

    /// The store serving `domain`
    pub fn for_domain(&self, domain: TrustDomain) -> &Arc<dyn SubjectStore> {
        match domain {
            TrustDomain::User => &self.user,
            TrustDomain::Admin => &self.admin,
            TrustDomain::SuperAdmin => &self.superadmin,
        }
    }
}

impl std::fmt::Debug for SubjectStores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubjectStores").finish_non_exhaustive()
    }
}
