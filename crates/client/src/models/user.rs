//! User records.

use serde::{Deserialize, Serialize};

use lunchbox_core::{Email, UserId};

/// A known user.
///
/// Users are pre-seeded as demo data or auto-provisioned on first login
/// with an unseen email. Email uniqueness is assumed, not enforced;
/// lookup is a linear scan over the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub is_admin: bool,
}
