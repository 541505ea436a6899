mod common;

use common::{active_super_admin_count, seed_admin, seed_participant, test_pool};
use hackportal::database::admin_repo;
use hackportal::error::AppError;
use hackportal::models::{ActorStatus, Role};
use hackportal::services::admin_lifecycle_service::{self, PromoteInput};

#[tokio::test]
async fn sole_super_admin_cannot_be_demoted() {
    let pool = test_pool().await;
    seed_admin(&pool, "s1", "s1@portal.test", Role::SuperAdmin, ActorStatus::Active).await;

    let err = admin_lifecycle_service::change_role(&pool, Role::SuperAdmin, "s1", Role::Admin)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::LastSuperAdminViolation));

    // Rejected transitions must not mutate anything.
    let row = admin_repo::load_admin(&pool, "s1").await.unwrap().unwrap();
    assert_eq!(row.role, "super_admin");
    assert_eq!(active_super_admin_count(&pool).await, 1);
}

#[tokio::test]
async fn demotion_succeeds_with_a_second_active_super_admin() {
    let pool = test_pool().await;
    seed_admin(&pool, "s1", "s1@portal.test", Role::SuperAdmin, ActorStatus::Active).await;
    seed_admin(&pool, "s2", "s2@portal.test", Role::SuperAdmin, ActorStatus::Active).await;

    let view = admin_lifecycle_service::change_role(&pool, Role::SuperAdmin, "s1", Role::Admin)
        .await
        .unwrap();
    assert_eq!(view.role, Role::Admin);
    assert_eq!(active_super_admin_count(&pool).await, 1);
}

#[tokio::test]
async fn suspending_supers_stops_at_the_last_active_one() {
    let pool = test_pool().await;
    seed_admin(&pool, "s1", "s1@portal.test", Role::SuperAdmin, ActorStatus::Active).await;
    seed_admin(&pool, "s2", "s2@portal.test", Role::SuperAdmin, ActorStatus::Active).await;

    // S2 suspends S1: fine, S2 remains active.
    let view = admin_lifecycle_service::change_status(
        &pool,
        "s2",
        Role::SuperAdmin,
        "s1",
        ActorStatus::Suspended,
    )
    .await
    .unwrap();
    assert_eq!(view.status, ActorStatus::Suspended);
    assert_eq!(active_super_admin_count(&pool).await, 1);

    // Now S2 is the last active super admin and cannot be suspended.
    let err = admin_lifecycle_service::change_status(
        &pool,
        "s1",
        Role::SuperAdmin,
        "s2",
        ActorStatus::Suspended,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::LastSuperAdminViolation));
    assert_eq!(active_super_admin_count(&pool).await, 1);
}

#[tokio::test]
async fn status_self_modification_is_forbidden_for_every_role() {
    let pool = test_pool().await;
    seed_admin(&pool, "s1", "s1@portal.test", Role::SuperAdmin, ActorStatus::Active).await;
    seed_admin(&pool, "s2", "s2@portal.test", Role::SuperAdmin, ActorStatus::Active).await;

    for status in [ActorStatus::Active, ActorStatus::Inactive, ActorStatus::Suspended] {
        let err = admin_lifecycle_service::change_status(
            &pool,
            "s1",
            Role::SuperAdmin,
            "s1",
            status,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::SelfModificationForbidden));
    }
}

#[tokio::test]
async fn removal_is_blocked_for_self_and_for_the_sole_super_admin() {
    let pool = test_pool().await;
    seed_admin(&pool, "s1", "s1@portal.test", Role::SuperAdmin, ActorStatus::Active).await;
    seed_admin(&pool, "a1", "a1@portal.test", Role::Admin, ActorStatus::Active).await;

    let err = admin_lifecycle_service::remove(&pool, "s1", Role::SuperAdmin, "s1")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::SelfModificationForbidden));

    // Another super admin may not remove the sole one either, even suspended.
    let mut conn = pool.acquire().await.unwrap();
    admin_repo::update_status_tx(&mut conn, "s1", "suspended").await.unwrap();
    drop(conn);

    let err = admin_lifecycle_service::remove(&pool, "a1", Role::SuperAdmin, "s1")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::LastSuperAdminViolation));
    assert!(admin_repo::load_admin(&pool, "s1").await.unwrap().is_some());

    // Removing a plain admin works and echoes the identity fields.
    let removed = admin_lifecycle_service::remove(&pool, "s1", Role::SuperAdmin, "a1")
        .await
        .unwrap();
    assert_eq!(removed.id, "a1");
    assert_eq!(removed.email, "a1@portal.test");
    assert_eq!(removed.role, Role::Admin);
    assert!(admin_repo::load_admin(&pool, "a1").await.unwrap().is_none());
}

#[tokio::test]
async fn lifecycle_mutations_require_super_admin() {
    let pool = test_pool().await;
    seed_admin(&pool, "s1", "s1@portal.test", Role::SuperAdmin, ActorStatus::Active).await;
    seed_admin(&pool, "a1", "a1@portal.test", Role::Admin, ActorStatus::Active).await;

    let err = admin_lifecycle_service::change_role(&pool, Role::Admin, "a1", Role::Volunteer)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));

    let err = admin_lifecycle_service::change_status(
        &pool,
        "a1",
        Role::Admin,
        "s1",
        ActorStatus::Suspended,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));

    let err = admin_lifecycle_service::remove(&pool, "a1", Role::Volunteer, "s1")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));

    // The capability table shows a remove affordance for plain admins, but
    // the lifecycle transition itself stays super-admin only.
    assert!(
        hackportal::services::permissions::permissions_for(Role::Admin, false).can_remove_admin
    );
    let err = admin_lifecycle_service::remove(&pool, "a1", Role::Admin, "s1")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));
    assert!(admin_repo::load_admin(&pool, "s1").await.unwrap().is_some());
}

#[tokio::test]
async fn promotion_creates_an_actor_from_a_participant() {
    let pool = test_pool().await;
    seed_admin(&pool, "a1", "a1@portal.test", Role::Admin, ActorStatus::Active).await;
    seed_participant(&pool, "p1", "p1@portal.test").await;

    let view = admin_lifecycle_service::promote(
        &pool,
        "a1",
        Role::Admin,
        PromoteInput {
            participant_id: "p1".to_string(),
            role: Role::Volunteer,
            status: None,
        },
    )
    .await
    .unwrap();

    assert_eq!(view.id, "p1");
    assert_eq!(view.email, "p1@portal.test");
    assert_eq!(view.role, Role::Volunteer);
    assert_eq!(view.status, ActorStatus::Active);
    // Promoted from a participant, so not an admin-only account.
    assert!(!view.admin_only);
}

#[tokio::test]
async fn promotion_rejects_duplicates_and_unknown_participants() {
    let pool = test_pool().await;
    seed_admin(&pool, "a1", "a1@portal.test", Role::Admin, ActorStatus::Active).await;
    seed_participant(&pool, "p1", "p1@portal.test").await;
    // Participant whose email is already taken by an existing admin account.
    seed_participant(&pool, "p2", "a1@portal.test2").await;
    seed_admin(&pool, "x9", "a1@portal.test2", Role::Volunteer, ActorStatus::Active).await;

    let err = admin_lifecycle_service::promote(
        &pool,
        "a1",
        Role::Admin,
        PromoteInput {
            participant_id: "ghost".to_string(),
            role: Role::Admin,
            status: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = admin_lifecycle_service::promote(
        &pool,
        "a1",
        Role::Admin,
        PromoteInput {
            participant_id: "p2".to_string(),
            role: Role::Admin,
            status: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
    // No duplicate row was created.
    assert!(admin_repo::load_admin(&pool, "p2").await.unwrap().is_none());

    // Promoting someone who is already an admin is a conflict too.
    admin_lifecycle_service::promote(
        &pool,
        "a1",
        Role::Admin,
        PromoteInput {
            participant_id: "p1".to_string(),
            role: Role::Admin,
            status: None,
        },
    )
    .await
    .unwrap();
    let err = admin_lifecycle_service::promote(
        &pool,
        "a1",
        Role::Admin,
        PromoteInput {
            participant_id: "p1".to_string(),
            role: Role::Admin,
            status: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn promotion_is_denied_to_volunteers() {
    let pool = test_pool().await;
    seed_admin(&pool, "v1", "v1@portal.test", Role::Volunteer, ActorStatus::Active).await;
    seed_participant(&pool, "p1", "p1@portal.test").await;

    let err = admin_lifecycle_service::promote(
        &pool,
        "v1",
        Role::Volunteer,
        PromoteInput {
            participant_id: "p1".to_string(),
            role: Role::Admin,
            status: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));
    assert!(admin_repo::load_admin(&pool, "p1").await.unwrap().is_none());
}

#[tokio::test]
async fn admin_listing_is_super_admin_only_and_flags_admin_only_accounts() {
    let pool = test_pool().await;
    seed_admin(&pool, "s1", "s1@portal.test", Role::SuperAdmin, ActorStatus::Active).await;
    seed_admin(&pool, "a1", "a1@portal.test", Role::Admin, ActorStatus::Active).await;
    seed_participant(&pool, "a1", "p-a1@portal.test").await;

    let err = admin_lifecycle_service::list_admin_accounts(&pool, Role::Admin)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));

    let admins = admin_lifecycle_service::list_admin_accounts(&pool, Role::SuperAdmin)
        .await
        .unwrap();
    assert_eq!(admins.len(), 2);
    let s1 = admins.iter().find(|a| a.id == "s1").unwrap();
    let a1 = admins.iter().find(|a| a.id == "a1").unwrap();
    // s1 has no participant row, a1 was promoted from one.
    assert!(s1.admin_only);
    assert!(!a1.admin_only);
}
