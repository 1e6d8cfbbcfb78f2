//! Lunch item catalog records.

use serde::{Deserialize, Serialize};

use lunchbox_core::{ItemId, Price};

/// A lunch item in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LunchItem {
    /// Timestamp-derived identity, assigned at creation.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Catalog price (non-negative decimal).
    pub price: Price,
    /// Optional longer description.
    pub description: Option<String>,
    /// Optional category label (e.g. "Salads").
    pub category: Option<String>,
    /// Whether the item can currently be ordered.
    pub available: bool,
}

/// Input for creating a catalog item.
///
/// The id is assigned and `available` is forced to `true` when the
/// items slice persists the new record.
#[derive(Debug, Clone)]
pub struct NewLunchItem {
    pub name: String,
    pub price: Price,
    pub description: Option<String>,
    pub category: Option<String>,
}

impl NewLunchItem {
    /// Assign an identity and availability, producing the record to persist.
    #[must_use]
    pub fn into_item(self, id: ItemId) -> LunchItem {
        LunchItem {
            id,
            name: self.name,
            price: self.price,
            description: self.description,
            category: self.category,
            available: true,
        }
    }
}
