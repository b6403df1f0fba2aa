//! Capability gate evaluation against in-memory stores

mod common;

use bazaar_auth_core::{AuthError, Capability, CapabilityGate, Denial};
use bazaar_db::StoreStatus;
use bazaar_types::{Principal, RegularUser, Roles, SubjectId, SuperAdmin};
use common::MockStoreRepository;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn seller() -> Principal {
    Principal::RegularUser(RegularUser {
        id: SubjectId::new(),
        email: "seller@example.com".into(),
        username: "seller".into(),
        roles: Roles {
            is_seller: true,
            ..Roles::default()
        },
    })
}

fn gate_with(stores: &Arc<MockStoreRepository>) -> CapabilityGate {
    CapabilityGate::new(stores.clone())
}

#[tokio::test]
async fn test_seller_needs_an_active_store() {
    let stores = Arc::new(MockStoreRepository::new());
    let gate = gate_with(&stores);
    let principal = seller();
    let owner = principal.id().unwrap().0;

    let err = gate
        .check(&Capability::SellerWithActiveStore, &principal)
        .await
        .unwrap_err();
    assert_eq!(err.denial(), Some(Denial::NoActiveStore));

    stores.add_store(owner, StoreStatus::Suspended);
    stores.add_store(owner, StoreStatus::PendingDeletion);
    let err = gate
        .check(&Capability::SellerWithActiveStore, &principal)
        .await
        .unwrap_err();
    assert_eq!(err.denial(), Some(Denial::NoActiveStore));

    stores.add_store(owner, StoreStatus::Active);
    assert!(gate
        .check(&Capability::SellerWithActiveStore, &principal)
        .await
        .is_ok());
}

#[tokio::test]
async fn test_composed_requirements_report_first_failure() {
    let stores = Arc::new(MockStoreRepository::new());
    let gate = gate_with(&stores);

    let err = gate
        .check_all(
            &[Capability::Authenticated, Capability::StaffOrSuper],
            &Principal::Anonymous,
        )
        .await
        .unwrap_err();
    assert_eq!(err.denial(), Some(Denial::Unauthenticated));

    let err = gate
        .check_all(
            &[Capability::Authenticated, Capability::StaffOrSuper],
            &seller(),
        )
        .await
        .unwrap_err();
    assert_eq!(err.denial(), Some(Denial::InsufficientRole));
}

#[tokio::test]
async fn test_denied_operation_never_runs() {
    let stores = Arc::new(MockStoreRepository::new());
    let gate = gate_with(&stores);
    let calls = AtomicUsize::new(0);

    let result: Result<(), AuthError> = gate
        .guard(&[Capability::SuperOnly], &seller(), || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
        .await;
    assert_eq!(
        result.unwrap_err().denial(),
        Some(Denial::InsufficientRole)
    );
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let root = Principal::SuperAdmin(SuperAdmin {
        id: SubjectId::new(),
        username: "root".into(),
        email: "root@example.com".into(),
    });
    let value: Result<u32, AuthError> = gate
        .guard(&[Capability::SuperOnly], &root, || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(7)
        })
        .await;
    assert_eq!(value.unwrap(), 7);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_self_or_staff_for_target() {
    let stores = Arc::new(MockStoreRepository::new());
    let gate = gate_with(&stores);
    let me = seller();
    let target = me.id().unwrap();

    assert!(gate
        .check(&Capability::SelfOrStaff(target), &me)
        .await
        .is_ok());

    let err = gate
        .check(&Capability::SelfOrStaff(target), &seller())
        .await
        .unwrap_err();
    assert_eq!(err.denial(), Some(Denial::NotSelf));
    assert_eq!(err.status_code(), 403);
}
