//! Core domain types shared across Lunchbox crates.

pub mod email;
pub mod id;
pub mod price;
pub mod status;

pub use email::{Email, EmailError};
pub use id::{ItemId, OrderId, UserId};
pub use price::{Price, PriceError};
pub use status::OrderStatus;
