//! The embedded object store.
//!
//! A versioned SQLite database standing in for the browser's transactional
//! object database, with four independently-keyed collections:
//!
//! - `lunch_items` - the catalog, keyed by `id`
//! - `orders` - placed orders, keyed by `id`, indexed by `user_id` and `date`
//! - `users` - known users, keyed by `id`
//! - `auth_state` - the singleton session record under the fixed key `current`
//!
//! The database is opened lazily and upgraded in place when the schema
//! version (tracked via `PRAGMA user_version`) increases. Initialization is
//! idempotent: repeated or concurrent calls never duplicate schema setup.
//!
//! # Failure policy
//!
//! Initialization failures propagate to the caller without retry.
//! Individual operation failures propagate as [`StoreError`]; callers log
//! them, this layer never swallows them.

pub mod auth_state;
pub mod items;
pub mod orders;
pub mod users;

use std::path::Path;
use std::sync::Arc;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::debug;

pub use auth_state::AuthStateRepository;
pub use items::ItemRepository;
pub use orders::OrderRepository;
pub use users::UserRepository;

/// Current schema version.
///
/// v1 created `lunch_items`, `orders` (with its two indexes) and `users`;
/// v2 added the `auth_state` collection.
const SCHEMA_VERSION: i64 = 2;

/// Errors that can occur during object store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// A record could not be (de)serialized for storage.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Handle to the embedded object store.
///
/// Cheap to clone; constructed once at process start and passed by
/// reference to consumers. Repositories obtained from an uninitialized
/// handle fail on first use with the underlying connection error, so call
/// [`ObjectStore::initialize`] (or construct via [`ObjectStore::open`])
/// before handing the store out.
#[derive(Clone)]
pub struct ObjectStore {
    pool: SqlitePool,
    migrated: Arc<OnceCell<()>>,
}

impl ObjectStore {
    /// Create a lazy handle to the database at `path`.
    ///
    /// No connection is made until [`initialize`](Self::initialize) or the
    /// first operation runs. The file is created if absent.
    #[must_use]
    pub fn connect(path: &Path) -> Self {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        Self::from_options(options)
    }

    /// Open and initialize the database at `path`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the database cannot be opened or
    /// the schema upgrade fails. Initialization failures are not retried.
    pub async fn open(path: &Path) -> Result<Self, StoreError> {
        let store = Self::connect(path);
        store.initialize().await?;
        Ok(store)
    }

    /// Open and initialize a fresh in-memory database.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the schema setup fails.
    pub async fn open_in_memory() -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::new().in_memory(true);
        let store = Self::from_options(options);
        store.initialize().await?;
        Ok(store)
    }

    fn from_options(options: SqliteConnectOptions) -> Self {
        // One connection: the store serializes conflicting reads/writes
        // itself, and an in-memory database lives and dies with it.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_lazy_with(options);
        Self {
            pool,
            migrated: Arc::new(OnceCell::new()),
        }
    }

    /// Ensure all collections exist at the current schema version.
    ///
    /// Idempotent: concurrent and repeated calls share one migration run,
    /// and the migration statements themselves are `IF NOT EXISTS` guarded.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if opening or upgrading fails.
    pub async fn initialize(&self) -> Result<(), StoreError> {
        self.migrated
            .get_or_try_init(|| migrate(&self.pool))
            .await?;
        Ok(())
    }

    /// The lunch item collection.
    #[must_use]
    pub const fn items(&self) -> ItemRepository<'_> {
        ItemRepository::new(&self.pool)
    }

    /// The order collection.
    #[must_use]
    pub const fn orders(&self) -> OrderRepository<'_> {
        OrderRepository::new(&self.pool)
    }

    /// The user collection.
    #[must_use]
    pub const fn users(&self) -> UserRepository<'_> {
        UserRepository::new(&self.pool)
    }

    /// The singleton auth-state record.
    #[must_use]
    pub const fn auth_state(&self) -> AuthStateRepository<'_> {
        AuthStateRepository::new(&self.pool)
    }
}

/// Bring the schema up to [`SCHEMA_VERSION`] in place.
async fn migrate(pool: &SqlitePool) -> Result<(), StoreError> {
    let version: i64 = sqlx::query_scalar("PRAGMA user_version")
        .fetch_one(pool)
        .await?;

    if version < 1 {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS lunch_items (
                id          TEXT PRIMARY KEY,
                name        TEXT NOT NULL,
                price       TEXT NOT NULL,
                description TEXT,
                category    TEXT,
                available   INTEGER NOT NULL DEFAULT 1
            )
            ",
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS orders (
                id           TEXT PRIMARY KEY,
                user_id      TEXT NOT NULL,
                user_name    TEXT NOT NULL,
                date         TEXT NOT NULL,
                items        TEXT NOT NULL,
                total_amount TEXT NOT NULL,
                status       TEXT NOT NULL
            )
            ",
        )
        .execute(pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_orders_user_id ON orders(user_id)")
            .execute(pool)
            .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_orders_date ON orders(date)")
            .execute(pool)
            .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users (
                id       TEXT PRIMARY KEY,
                name     TEXT NOT NULL,
                email    TEXT NOT NULL,
                is_admin INTEGER NOT NULL DEFAULT 0
            )
            ",
        )
        .execute(pool)
        .await?;
    }

    if version < 2 {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS auth_state (
                key              TEXT PRIMARY KEY,
                current_user     TEXT,
                is_authenticated INTEGER NOT NULL DEFAULT 0,
                timestamp        INTEGER NOT NULL
            )
            ",
        )
        .execute(pool)
        .await?;
    }

    if version < SCHEMA_VERSION {
        sqlx::query(&format!("PRAGMA user_version = {SCHEMA_VERSION}"))
            .execute(pool)
            .await?;
        debug!(from = version, to = SCHEMA_VERSION, "object store schema upgraded");
    }

    Ok(())
}
