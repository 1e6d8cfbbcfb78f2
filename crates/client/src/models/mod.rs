//! Domain records persisted by the object store.
//!
//! Orders embed denormalized copies of the lunch items they were placed
//! with; catalog edits never reach back into persisted orders.

pub mod item;
pub mod order;
pub mod session;
pub mod user;

pub use item::{LunchItem, NewLunchItem};
pub use order::{NewOrder, Order};
pub use session::{AUTH_STATE_RETENTION_MS, AuthSnapshot, AuthStateRecord};
pub use user::User;
