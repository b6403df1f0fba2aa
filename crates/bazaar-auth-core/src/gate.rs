//! Capability requirements and their evaluation
//!
//! Operations declare a list of [`Capability`] values at registration time;
//! [`CapabilityGate::guard`] evaluates them in order against the caller and
//! only runs the operation body when all of them hold.

use bazaar_db::StoreRepository;
use bazaar_types::{Principal, SubjectId};
use std::future::Future;
use std::sync::Arc;

use crate::{AuthError, Denial};

/// A precondition an operation demands of the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Anyone, including anonymous callers
    None,
    /// Any authenticated principal
    Authenticated,
    /// Staff or superuser regular user, or the super-admin
    StaffOrSuper,
    /// The super-admin only
    SuperOnly,
    /// Seller owning at least one active store
    SellerWithActiveStore,
    /// The target subject itself, or anyone satisfying `StaffOrSuper`
    SelfOrStaff(SubjectId),
}

impl Capability {
    /// Evaluate everything that depends on the principal alone.
    ///
    /// For `SellerWithActiveStore` this checks the seller flag only; the
    /// store lookup is done by [`CapabilityGate::check`].
    pub fn check_principal(&self, principal: &Principal) -> Result<(), Denial> {
        if matches!(self, Self::None) {
            return Ok(());
        }
        if principal.is_anonymous() {
            return Err(Denial::Unauthenticated);
        }

        match self {
            Self::None | Self::Authenticated => Ok(()),
            Self::StaffOrSuper => {
                if is_staff_or_super(principal) {
                    Ok(())
                } else {
                    Err(Denial::InsufficientRole)
                }
            }
            Self::SuperOnly => match principal {
                Principal::SuperAdmin(_) => Ok(()),
                _ => Err(Denial::InsufficientRole),
            },
            Self::SellerWithActiveStore => match principal.as_user() {
                Some(user) if user.roles.is_seller => Ok(()),
                _ => Err(Denial::InsufficientRole),
            },
            Self::SelfOrStaff(target) => {
                let is_self = matches!(principal, Principal::RegularUser(u) if u.id == *target);
                if is_self || is_staff_or_super(principal) {
                    Ok(())
                } else {
                    Err(Denial::NotSelf)
                }
            }
        }
    }
}

fn is_staff_or_super(principal: &Principal) -> bool {
    match principal {
        Principal::RegularUser(user) => user.roles.is_admin(),
        Principal::SuperAdmin(_) => true,
        Principal::Anonymous => false,
    }
}

/// Evaluates capability requirements, consulting the store repository when
/// a requirement needs it
#[derive(Clone)]
pub struct CapabilityGate {
    stores: Arc<dyn StoreRepository>,
}

impl CapabilityGate {
    pub fn new(stores: Arc<dyn StoreRepository>) -> Self {
        Self { stores }
    }

    /// Evaluate one requirement
    pub async fn check(&self, capability: &Capability, principal: &Principal) -> Result<(), AuthError> {
        capability.check_principal(principal)?;

        if let (Capability::SellerWithActiveStore, Principal::RegularUser(user)) =
            (capability, principal)
        {
            if !self.stores.has_active_store(user.id.0).await? {
                return Err(Denial::NoActiveStore.into());
            }
        }

        Ok(())
    }

    /// Evaluate requirements in order, stopping at the first failure
    pub async fn check_all(
        &self,
        capabilities: &[Capability],
        principal: &Principal,
    ) -> Result<(), AuthError> {
        for capability in capabilities {
            if let Err(e) = self.check(capability, principal).await {
                tracing::debug!(
                    capability = ?capability,
                    principal = principal.kind(),
                    "Capability check failed: {}",
                    e
                );
                return Err(e);
            }
        }
        Ok(())
    }

    /// Run `operation` only if every requirement holds.
    ///
    /// On denial the operation is never invoked.
    pub async fn guard<T, E, F, Fut>(
        &self,
        capabilities: &[Capability],
        principal: &Principal,
        operation: F,
    ) -> Result<T, E>
    where
        E: From<AuthError>,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.check_all(capabilities, principal).await?;
        operation().await
    }
}

impl std::fmt::Debug for CapabilityGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapabilityGate").finish_non_exhaustive()
    }
}
