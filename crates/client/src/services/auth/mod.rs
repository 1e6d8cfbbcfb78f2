//! Auth persistence facade.
//!
//! Single source of truth for "is a user currently logged in", with
//! redundant storage for resilience: the durable object store holds the
//! timestamped session record, and an in-process ephemeral cache mirrors
//! the raw snapshot as JSON. The ephemeral copy outlives a store outage
//! but not the process, matching tab-scoped fallback storage.
//!
//! Every entry point degrades instead of failing: a broken store reduces
//! to "no session" on read and to the fallback copy on write. This is the
//! only retry/fallback behavior in the system.

use chrono::Utc;
use moka::future::Cache;
use tracing::{instrument, warn};

use crate::db::ObjectStore;
use crate::models::session::keys;
use crate::models::{AuthSnapshot, AuthStateRecord};

/// Cheap-to-clone handle over both session stores.
///
/// Constructed once at process start and passed by reference (or cloned
/// into the mirror task); there is no global singleton.
#[derive(Clone)]
pub struct AuthPersistence {
    store: ObjectStore,
    fallback: Cache<&'static str, String>,
}

impl AuthPersistence {
    /// Create the facade over an initialized object store.
    #[must_use]
    pub fn new(store: ObjectStore) -> Self {
        // The fallback holds exactly one entry, the serialized session.
        let fallback = Cache::builder().max_capacity(1).build();
        Self { store, fallback }
    }

    /// Persist the current auth state.
    ///
    /// Writes a timestamped record durably and mirrors the untimestamped
    /// snapshot into the ephemeral fallback. A durable-store failure is
    /// logged and the fallback write still happens; saving never fails.
    #[instrument(skip_all, fields(authenticated = snapshot.is_authenticated))]
    pub async fn save(&self, snapshot: AuthSnapshot) {
        let record =
            AuthStateRecord::from_snapshot(snapshot.clone(), Utc::now().timestamp_millis());

        if let Err(e) = self.store.auth_state().save(&record).await {
            warn!(error = %e, "failed to save auth state durably, keeping fallback copy only");
        }

        match serde_json::to_string(&snapshot) {
            Ok(json) => self.fallback.insert(keys::SESSION, json).await,
            Err(e) => warn!(error = %e, "failed to encode auth state for fallback storage"),
        }
    }

    /// Load the persisted auth state.
    ///
    /// Prefers the durable record (expiry is enforced at that read path);
    /// falls back to the ephemeral copy; reduces every failure to an
    /// empty snapshot. Never errors.
    pub async fn load(&self) -> AuthSnapshot {
        match self.store.auth_state().load().await {
            Ok(Some(snapshot)) => return snapshot,
            Ok(None) => {}
            Err(e) => warn!(error = %e, "failed to load auth state from store"),
        }

        self.load_fallback().await.unwrap_or_default()
    }

    /// Clear both session copies.
    ///
    /// Each delete is its own failure domain: a failed durable delete is
    /// logged and does not block clearing the fallback.
    pub async fn clear(&self) {
        if let Err(e) = self.store.auth_state().clear().await {
            warn!(error = %e, "failed to clear durable auth state");
        }
        self.fallback.invalidate(&keys::SESSION).await;
    }

    /// Whether the ephemeral copy holds an authenticated session.
    pub async fn is_session_valid(&self) -> bool {
        self.load_fallback().await.is_some_and(|s| s.is_active())
    }

    async fn load_fallback(&self) -> Option<AuthSnapshot> {
        let json = self.fallback.get(&keys::SESSION).await?;
        match serde_json::from_str(&json) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!(error = %e, "discarding malformed fallback session copy");
                None
            }
        }
    }
}
