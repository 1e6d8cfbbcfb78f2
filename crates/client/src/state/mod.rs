//! In-memory application state.
//!
//! Three independent slices (items, orders, auth), each a small state
//! machine over `{loading, error, data}` whose transitions are driven by
//! the lifecycle of its async operations against the object store. The
//! slices hold transient mirrors; the store owns the durable copies and
//! the mirrors are rebuilt from it on initialization.
//!
//! Every operation takes a [`CancellationToken`]; a token observed
//! cancelled after the durable await resolves makes the operation return
//! [`AppError::Cancelled`](crate::AppError::Cancelled) without applying
//! its in-memory reduction, so views torn down mid-flight never see late
//! completions.
//!
//! Auth transitions additionally publish [`AuthEvent`]s; a spawned mirror
//! subscriber copies each post-update snapshot back into persistence.

pub mod auth;
pub mod events;
pub mod items;
pub mod orders;

pub use auth::{AuthSlice, AuthState};
pub use events::{AuthEvent, run_auth_mirror, spawn_auth_mirror};
pub use items::{ItemsSlice, ItemsState};
pub use orders::{OrdersSlice, OrdersState};

/// The full in-memory application state.
///
/// The slices are independent: the three initial fetches race freely and
/// there is no cross-slice ordering guarantee.
#[derive(Default)]
pub struct AppState {
    pub items: ItemsSlice,
    pub orders: OrdersSlice,
    pub auth: AuthSlice,
}

impl AppState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
