//! Integration tests for session persistence, expiry, and mirroring.

use chrono::Utc;
use tokio_util::sync::CancellationToken;

use lunchbox_client::models::{AUTH_STATE_RETENTION_MS, AuthSnapshot, AuthStateRecord, User};
use lunchbox_client::services::AuthPersistence;
use lunchbox_client::state::{AuthSlice, spawn_auth_mirror};
use lunchbox_core::{Email, UserId};
use lunchbox_integration_tests::{fresh_store, seeded_store};

fn demo_admin() -> User {
    User {
        id: UserId::new("admin-1"),
        name: "Admin User".to_owned(),
        email: Email::parse("admin@company.com").expect("valid email"),
        is_admin: true,
    }
}

// =============================================================================
// Expiry
// =============================================================================

#[tokio::test]
async fn test_expired_record_is_absent_and_purged() {
    let store = fresh_store().await;

    let stale = AuthStateRecord {
        current_user: Some(demo_admin()),
        is_authenticated: true,
        timestamp: Utc::now().timestamp_millis() - AUTH_STATE_RETENTION_MS - 1,
    };
    store.auth_state().save(&stale).await.expect("save");

    // First read applies the retention window and purges.
    assert_eq!(store.auth_state().load().await.expect("load"), None);
    // Subsequent reads observe the purged record.
    assert_eq!(store.auth_state().load().await.expect("reload"), None);

    let persistence = AuthPersistence::new(store);
    assert_eq!(persistence.load().await, AuthSnapshot::default());
}

#[tokio::test]
async fn test_fresh_record_survives_load() {
    let store = fresh_store().await;
    let persistence = AuthPersistence::new(store);

    let snapshot = AuthSnapshot {
        current_user: Some(demo_admin()),
        is_authenticated: true,
    };
    persistence.save(snapshot.clone()).await;

    assert_eq!(persistence.load().await, snapshot);
    assert!(persistence.is_session_valid().await);
}

// =============================================================================
// Login / logout round trips through the mirror
// =============================================================================

#[tokio::test]
async fn test_demo_login_round_trip() {
    let store = fresh_store().await;
    let persistence = AuthPersistence::new(store.clone());
    let cancel = CancellationToken::new();

    let mut auth = AuthSlice::new();
    let mirror = spawn_auth_mirror(persistence.clone(), auth.subscribe());

    let email = Email::parse("admin@gmail.com").expect("valid email");
    let user = auth
        .login_with_credentials(&store, &cancel, &email, true)
        .await
        .expect("login");

    assert_eq!(user.email, email);
    assert!(user.is_admin);
    assert!(auth.state().is_authenticated);
    assert_eq!(auth.state().current_user.as_ref(), Some(&user));

    // Dropping the slice closes the event channel; the mirror drains the
    // login event and exits, making the mirrored write observable.
    drop(auth);
    mirror.await.expect("mirror task");

    let restored = persistence.load().await;
    assert!(restored.is_active());
    assert_eq!(
        restored.current_user.map(|u| u.email),
        Some(Email::parse("admin@gmail.com").expect("valid email"))
    );
}

#[tokio::test]
async fn test_restored_session_after_login() {
    let store = seeded_store().await;
    let persistence = AuthPersistence::new(store.clone());
    let cancel = CancellationToken::new();

    {
        let mut auth = AuthSlice::new();
        let mirror = spawn_auth_mirror(persistence.clone(), auth.subscribe());
        auth.simulate_login(&store, &cancel, &UserId::new("user-1"))
            .await
            .expect("demo login");
        drop(auth);
        mirror.await.expect("mirror task");
    }

    // A second app start restores the mirrored session.
    let mut auth = AuthSlice::new();
    auth.initialize(&persistence, &cancel)
        .await
        .expect("initialize");

    assert!(auth.state().is_initialized);
    assert!(auth.state().is_authenticated);
    assert_eq!(
        auth.state().current_user.as_ref().map(|u| u.id.clone()),
        Some(UserId::new("user-1"))
    );
}

#[tokio::test]
async fn test_logout_user_clears_persisted_session() {
    let store = seeded_store().await;
    let persistence = AuthPersistence::new(store.clone());
    let cancel = CancellationToken::new();

    let mut auth = AuthSlice::new();
    auth.simulate_login(&store, &cancel, &UserId::new("user-2"))
        .await
        .expect("demo login");
    persistence.save(AuthSnapshot {
        current_user: auth.state().current_user.clone(),
        is_authenticated: true,
    })
    .await;

    auth.logout_user(&persistence, &cancel)
        .await
        .expect("logout");

    assert!(!auth.state().is_authenticated);
    assert!(auth.state().current_user.is_none());
    assert_eq!(persistence.load().await, AuthSnapshot::default());
    assert!(!persistence.is_session_valid().await);
}

#[tokio::test]
async fn test_sync_logout_keeps_persisted_session() {
    let store = seeded_store().await;
    let persistence = AuthPersistence::new(store.clone());
    let cancel = CancellationToken::new();

    let mut auth = AuthSlice::new();
    auth.simulate_login(&store, &cancel, &UserId::new("user-1"))
        .await
        .expect("demo login");
    let snapshot = AuthSnapshot {
        current_user: auth.state().current_user.clone(),
        is_authenticated: true,
    };
    persistence.save(snapshot.clone()).await;

    // Memory-only logout: both end states agree in memory, but only
    // logout_user touches persistence.
    auth.logout();

    assert!(!auth.state().is_authenticated);
    assert_eq!(persistence.load().await, snapshot);
}
