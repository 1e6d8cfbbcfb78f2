//! Lunchbox client application layer.
//!
//! This crate is the persistence and state-synchronization core of the
//! lunch-ordering application:
//!
//! - [`db`] - The embedded object store: four SQLite-backed collections
//!   (lunch items, orders, users, auth state) behind typed repositories.
//! - [`services`] - The auth persistence facade: a durable session record
//!   with an in-process ephemeral fallback and a 7-day retention window.
//! - [`state`] - In-memory state slices (items, orders, auth) driven by
//!   async operations against the store, plus the auth event channel that
//!   mirrors login/logout transitions back into persistence.
//! - [`export`] - CSV rendering of orders for the admin summary views.
//! - [`seed`] - Demo catalog and user seeding for first launch.
//!
//! There is no server in this system; the store is the single durable
//! authority and the slices hold transient mirrors that the UI reads.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod models;
pub mod seed;
pub mod services;
pub mod state;

pub use config::{Config, ConfigError};
pub use db::{ObjectStore, StoreError};
pub use error::AppError;
