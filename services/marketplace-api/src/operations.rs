//! Static operation tables, one per trust domain.
//!
//! Each CRUD operation of the external layer declares its requirement here,
//! next to its name, so the whole contract surface of an endpoint can be read
//! in one place.

use bazaar_auth_core::Capability;
use bazaar_types::{SubjectId, TrustDomain};

use Capability::{Authenticated, SellerWithActiveStore, StaffOrSuper, SuperOnly};

/// Requirement declared by an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Conjunction of fixed capabilities, evaluated in order
    Fixed(&'static [Capability]),
    /// Caller must be the target subject or staff; the target comes with the request
    SelfOrStaff,
}

impl Requirement {
    /// Expand into concrete capabilities; `None` when a target is needed but absent
    pub fn capabilities(self, target: Option<SubjectId>) -> Option<Vec<Capability>> {
        match self {
            Self::Fixed(caps) => Some(caps.to_vec()),
            Self::SelfOrStaff => target.map(|id| vec![Capability::SelfOrStaff(id)]),
        }
    }
}

const PUBLIC: Requirement = Requirement::Fixed(&[]);
const LOGIN: Requirement = Requirement::Fixed(&[Authenticated]);
const SELLER: Requirement = Requirement::Fixed(&[Authenticated, SellerWithActiveStore]);
const STAFF: Requirement = Requirement::Fixed(&[Authenticated, StaffOrSuper]);
const SUPER: Requirement = Requirement::Fixed(&[Authenticated, SuperOnly]);

/// Regular-user endpoint
pub static USER_OPERATIONS: &[(&str, Requirement)] = &[
    // Catalogue browsing
    ("list_categories", PUBLIC),
    ("get_product", PUBLIC),
    ("list_products", PUBLIC),
    ("search_products", PUBLIC),
    ("list_products_by_category", PUBLIC),
    ("list_products_by_type", PUBLIC),
    ("list_stores", PUBLIC),
    ("get_store", PUBLIC),
    // Own account
    ("get_profile", LOGIN),
    ("edit_profile", LOGIN),
    ("list_favourites", LOGIN),
    ("add_favourite", LOGIN),
    ("remove_favourite", LOGIN),
    ("list_followed_stores", LOGIN),
    ("follow_store", LOGIN),
    ("unfollow_store", LOGIN),
    ("list_notifications", LOGIN),
    ("mark_notification_read", LOGIN),
    ("mark_all_notifications_read", LOGIN),
    // A store is created before the seller has an active one
    ("create_store", LOGIN),
    // Seller back office
    ("list_own_stores", SELLER),
    ("get_own_store", SELLER),
    ("update_store", SELLER),
    ("delete_store", SELLER),
    ("list_own_products", SELLER),
    ("list_products_by_status", SELLER),
    ("create_product", SELLER),
    ("update_product", SELLER),
    ("delete_product", SELLER),
    ("create_variant", SELLER),
    ("update_variant", SELLER),
    ("delete_variant", SELLER),
    ("upload_product_image", SELLER),
    ("upload_variant_image", SELLER),
    ("delete_image", SELLER),
    ("reorder_images", SELLER),
];

/// Staff back-office endpoint
pub static ADMIN_OPERATIONS: &[(&str, Requirement)] = &[
    ("list_users", STAFF),
    ("get_user", STAFF),
    ("create_user", STAFF),
    ("create_admin", STAFF),
    ("update_user", STAFF),
    ("delete_user", STAFF),
    ("change_user_password", Requirement::SelfOrStaff),
    ("list_stores", STAFF),
    ("get_store", STAFF),
    ("create_store", STAFF),
    ("update_store", STAFF),
    ("delete_store", STAFF),
    ("list_categories", STAFF),
    ("get_category", STAFF),
    ("create_category", STAFF),
    ("update_category", STAFF),
    ("delete_category", STAFF),
    ("list_products", STAFF),
    ("get_product", STAFF),
    ("create_product", STAFF),
    ("update_product", STAFF),
    ("delete_product", STAFF),
    ("list_variants", STAFF),
    ("get_variant", STAFF),
    ("create_variant", STAFF),
    ("update_variant", STAFF),
    ("delete_variant", STAFF),
    ("list_images", STAFF),
    ("get_image", STAFF),
    ("create_image", STAFF),
    ("update_image", STAFF),
    ("delete_image", STAFF),
    ("list_audit_logs", STAFF),
    ("get_audit_log", STAFF),
];

/// Super-administrator endpoint
pub static SUPERADMIN_OPERATIONS: &[(&str, Requirement)] = &[
    ("list_superadmins", SUPER),
    ("get_profile", SUPER),
];

/// Operation table of a domain
pub fn table(domain: TrustDomain) -> &'static [(&'static str, Requirement)] {
    match domain {
        TrustDomain::User => USER_OPERATIONS,
        TrustDomain::Admin => ADMIN_OPERATIONS,
        TrustDomain::SuperAdmin => SUPERADMIN_OPERATIONS,
    }
}

/// Look up the requirement of `operation` on `domain`
pub fn requirement(domain: TrustDomain, operation: &str) -> Option<Requirement> {
    table(domain)
        .iter()
        .find(|(name, _)| *name == operation)
        .map(|(_, req)| *req)
}
