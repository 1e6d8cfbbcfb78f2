//! Shared helpers for Lunchbox integration tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

use lunchbox_client::ObjectStore;
use lunchbox_client::seed::seed_demo_data;

/// Install a test-friendly tracing subscriber (idempotent across tests).
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

/// A fresh, initialized in-memory store.
///
/// # Panics
///
/// Panics if the in-memory database cannot be set up.
pub async fn fresh_store() -> ObjectStore {
    init_tracing();
    ObjectStore::open_in_memory()
        .await
        .expect("in-memory store should open")
}

/// A fresh store pre-populated with the demo catalog and users.
///
/// # Panics
///
/// Panics if seeding fails.
pub async fn seeded_store() -> ObjectStore {
    let store = fresh_store().await;
    seed_demo_data(&store).await.expect("seeding should succeed");
    store
}
