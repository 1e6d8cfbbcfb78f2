//! Auth-state collection operations.
//!
//! One timestamped record under the fixed key `current`. The 7-day
//! retention window is enforced here, at the durable read path: an
//! expired record is purged and reported as absent.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use super::StoreError;
use crate::models::session::keys;
use crate::models::{AuthSnapshot, AuthStateRecord};

/// Internal row type for auth-state queries.
#[derive(Debug, sqlx::FromRow)]
struct AuthStateRow {
    current_user: Option<String>,
    is_authenticated: bool,
    timestamp: i64,
}

impl TryFrom<AuthStateRow> for AuthStateRecord {
    type Error = StoreError;

    fn try_from(row: AuthStateRow) -> Result<Self, Self::Error> {
        let current_user = row
            .current_user
            .as_deref()
            .map(serde_json::from_str)
            .transpose()
            .map_err(|e| {
                StoreError::DataCorruption(format!("invalid user in auth_state: {e}"))
            })?;

        Ok(Self {
            current_user,
            is_authenticated: row.is_authenticated,
            timestamp: row.timestamp,
        })
    }
}

/// Repository for the singleton `auth_state` record.
pub struct AuthStateRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> AuthStateRepository<'a> {
    pub(crate) const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Write the session record under the fixed key.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Serialization` if the user cannot be encoded,
    /// `StoreError::Database` if the write fails.
    pub async fn save(&self, record: &AuthStateRecord) -> Result<(), StoreError> {
        let current_user = record
            .current_user
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        sqlx::query(
            r"
            INSERT INTO auth_state (key, current_user, is_authenticated, timestamp)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(key) DO UPDATE SET
                current_user = excluded.current_user,
                is_authenticated = excluded.is_authenticated,
                timestamp = excluded.timestamp
            ",
        )
        .bind(keys::CURRENT)
        .bind(current_user)
        .bind(record.is_authenticated)
        .bind(record.timestamp)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Read the session record, purging it if the retention window has
    /// passed. An expired or absent record is `None`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the query or the purge fails.
    /// Returns `StoreError::DataCorruption` if the stored record is invalid.
    pub async fn load(&self) -> Result<Option<AuthSnapshot>, StoreError> {
        let row = sqlx::query_as::<_, AuthStateRow>(
            "SELECT current_user, is_authenticated, timestamp FROM auth_state WHERE key = ?1",
        )
        .bind(keys::CURRENT)
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let record = AuthStateRecord::try_from(row)?;
        if record.is_expired(Utc::now().timestamp_millis()) {
            debug!("persisted auth state expired, purging");
            self.clear().await?;
            return Ok(None);
        }

        Ok(Some(record.into_snapshot()))
    }

    /// Delete the session record. Clearing an absent record is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the write fails.
    pub async fn clear(&self) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM auth_state WHERE key = ?1")
            .bind(keys::CURRENT)
            .execute(self.pool)
            .await?;

        Ok(())
    }
}
