//! Order records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use lunchbox_core::{OrderId, OrderStatus, Price, UserId};

use super::item::LunchItem;

/// A placed order.
///
/// `items` are denormalized copies taken at checkout and `total_amount`
/// is the sum of their prices at that moment; neither is ever recomputed
/// from later catalog changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub user_name: String,
    /// Order date (YYYY-MM-DD), stamped at checkout.
    pub date: NaiveDate,
    /// Snapshot of the ordered items.
    pub items: Vec<LunchItem>,
    /// Sum of the embedded item prices at creation time.
    pub total_amount: Price,
    pub status: OrderStatus,
}

/// Input for placing an order at checkout.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: UserId,
    pub user_name: String,
    pub items: Vec<LunchItem>,
}

impl NewOrder {
    /// Build the order record: snapshot the items, sum the total, stamp
    /// today's date, and confirm.
    #[must_use]
    pub fn into_order(self, id: OrderId, date: NaiveDate) -> Order {
        let total_amount = self.items.iter().map(|item| item.price).sum();
        Order {
            id,
            user_id: self.user_id,
            user_name: self.user_name,
            date,
            items: self.items,
            total_amount,
            status: OrderStatus::Confirmed,
        }
    }
}
