//! Session-related types for auth persistence.
//!
//! The durable store keeps one timestamped [`AuthStateRecord`] under a
//! fixed key; the ephemeral fallback mirrors the untimestamped
//! [`AuthSnapshot`] as JSON.

use serde::{Deserialize, Serialize};

use super::user::User;

/// How long a persisted session stays valid: 7 days, in milliseconds.
///
/// A durable record older than this is treated as absent and purged at
/// the store's read path.
pub const AUTH_STATE_RETENTION_MS: i64 = 7 * 24 * 60 * 60 * 1000;

/// The current auth state, as the slices and the fallback store see it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSnapshot {
    /// The logged-in user, if any.
    pub current_user: Option<User>,
    /// Whether a login is active.
    pub is_authenticated: bool,
}

impl AuthSnapshot {
    /// True iff the snapshot carries a fully-authenticated session.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.current_user.is_some() && self.is_authenticated
    }
}

/// The singleton durable session record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthStateRecord {
    pub current_user: Option<User>,
    pub is_authenticated: bool,
    /// Unix milliseconds at save time; drives the retention window.
    pub timestamp: i64,
}

impl AuthStateRecord {
    /// Stamp a snapshot with the given save time.
    #[must_use]
    pub fn from_snapshot(snapshot: AuthSnapshot, timestamp: i64) -> Self {
        Self {
            current_user: snapshot.current_user,
            is_authenticated: snapshot.is_authenticated,
            timestamp,
        }
    }

    /// Drop the timestamp, recovering the snapshot.
    #[must_use]
    pub fn into_snapshot(self) -> AuthSnapshot {
        AuthSnapshot {
            current_user: self.current_user,
            is_authenticated: self.is_authenticated,
        }
    }

    /// Whether the record has outlived the retention window at `now_ms`.
    #[must_use]
    pub const fn is_expired(&self, now_ms: i64) -> bool {
        now_ms - self.timestamp > AUTH_STATE_RETENTION_MS
    }
}

/// Storage keys for session data.
pub mod keys {
    /// Fixed key of the singleton durable auth-state record.
    pub const CURRENT: &str = "current";

    /// Key of the ephemeral fallback session copy.
    pub const SESSION: &str = "lunch-app-session";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_window() {
        let record = AuthStateRecord::from_snapshot(AuthSnapshot::default(), 0);
        assert!(!record.is_expired(AUTH_STATE_RETENTION_MS));
        assert!(record.is_expired(AUTH_STATE_RETENTION_MS + 1));
    }

    #[test]
    fn test_snapshot_activity() {
        assert!(!AuthSnapshot::default().is_active());

        // A user without the authenticated flag is not an active session.
        let snapshot = AuthSnapshot {
            current_user: None,
            is_authenticated: true,
        };
        assert!(!snapshot.is_active());
    }
}
