//! Application services built on top of the object store.

pub mod auth;

pub use auth::AuthPersistence;
