//! Order slice.

use chrono::Utc;
use tokio_util::sync::CancellationToken;

use lunchbox_core::{OrderId, OrderStatus, UserId};

use crate::db::ObjectStore;
use crate::error::AppError;
use crate::models::{NewOrder, Order};

/// In-memory view of the order history.
#[derive(Debug, Default)]
pub struct OrdersState {
    /// All orders (admin views).
    pub orders: Vec<Order>,
    /// Orders of the user last fetched via `fetch_user_orders`.
    pub user_orders: Vec<Order>,
    pub loading: bool,
    pub error: Option<String>,
}

/// The order slice.
#[derive(Debug, Default)]
pub struct OrdersSlice {
    state: OrdersState,
}

impl OrdersSlice {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read access for views.
    #[must_use]
    pub const fn state(&self) -> &OrdersState {
        &self.state
    }

    /// Replace the in-memory order list with the store's contents.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Store` on a failed read (also surfaced via
    /// `state().error`), `AppError::Cancelled` if the token fired.
    pub async fn fetch_orders(
        &mut self,
        store: &ObjectStore,
        cancel: &CancellationToken,
    ) -> Result<(), AppError> {
        self.state.loading = true;
        self.state.error = None;

        let result = store.orders().list().await;
        self.state.loading = false;
        if cancel.is_cancelled() {
            return Err(AppError::Cancelled);
        }

        match result {
            Ok(orders) => {
                self.state.orders = orders;
                Ok(())
            }
            Err(e) => {
                self.state.error = Some(e.to_string());
                Err(e.into())
            }
        }
    }

    /// Replace `user_orders` with one user's orders.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Store` on a failed read (also surfaced via
    /// `state().error`), `AppError::Cancelled` if the token fired.
    pub async fn fetch_user_orders(
        &mut self,
        store: &ObjectStore,
        cancel: &CancellationToken,
        user_id: &UserId,
    ) -> Result<(), AppError> {
        self.state.loading = true;
        self.state.error = None;

        let result = store.orders().list_for_user(user_id).await;
        self.state.loading = false;
        if cancel.is_cancelled() {
            return Err(AppError::Cancelled);
        }

        match result {
            Ok(orders) => {
                self.state.user_orders = orders;
                Ok(())
            }
            Err(e) => {
                self.state.error = Some(e.to_string());
                Err(e.into())
            }
        }
    }

    /// Place an order at checkout.
    ///
    /// Snapshots the given items, sums their prices into the total, stamps
    /// today's date, confirms, persists, then appends to memory. The
    /// embedded items are copies; later catalog edits never reach them.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Store` if the durable write fails (state is left
    /// unchanged), `AppError::Cancelled` if the token fired.
    pub async fn create_order(
        &mut self,
        store: &ObjectStore,
        cancel: &CancellationToken,
        new: NewOrder,
    ) -> Result<Order, AppError> {
        let order = new.into_order(OrderId::generate(), Utc::now().date_naive());

        let result = store.orders().put(&order).await;
        if cancel.is_cancelled() {
            return Err(AppError::Cancelled);
        }
        result?;

        self.state.orders.push(order.clone());
        Ok(order)
    }

    /// Move an order to a new status.
    ///
    /// Reads the durable record, rewrites it with the new status, then
    /// replaces it in place in memory; an id absent from memory is a
    /// silent no-op (it may have been deleted concurrently).
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if no durable order has this id,
    /// `AppError::Store` on read/write failure, `AppError::Cancelled` if
    /// the token fired.
    pub async fn update_order_status(
        &mut self,
        store: &ObjectStore,
        cancel: &CancellationToken,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<Order, AppError> {
        let existing = store.orders().get(id).await;
        if cancel.is_cancelled() {
            return Err(AppError::Cancelled);
        }
        let mut order = existing?.ok_or_else(|| AppError::NotFound(format!("order {id}")))?;

        order.status = status;
        let result = store.orders().put(&order).await;
        if cancel.is_cancelled() {
            return Err(AppError::Cancelled);
        }
        result?;

        if let Some(slot) = self.state.orders.iter_mut().find(|o| o.id == order.id) {
            *slot = order.clone();
        }
        Ok(order)
    }

    /// Delete an order durably, then drop it from memory.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Store` if the durable write fails,
    /// `AppError::Cancelled` if the token fired.
    pub async fn delete_order(
        &mut self,
        store: &ObjectStore,
        cancel: &CancellationToken,
        id: &OrderId,
    ) -> Result<(), AppError> {
        let result = store.orders().delete(id).await;
        if cancel.is_cancelled() {
            return Err(AppError::Cancelled);
        }
        result?;

        self.state.orders.retain(|o| o.id != *id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use lunchbox_core::{ItemId, Price};

    use crate::models::LunchItem;

    use super::*;

    fn item(id: &str, cents: u32) -> LunchItem {
        LunchItem {
            id: ItemId::new(id),
            name: format!("Item {id}"),
            price: Price::from_cents(cents),
            description: None,
            category: None,
            available: true,
        }
    }

    fn checkout(items: Vec<LunchItem>) -> NewOrder {
        NewOrder {
            user_id: UserId::new("user-1"),
            user_name: "John Doe".to_owned(),
            items,
        }
    }

    #[tokio::test]
    async fn test_create_order_snapshots_total_and_date() {
        let store = ObjectStore::open_in_memory().await.expect("store");
        let cancel = CancellationToken::new();
        let mut slice = OrdersSlice::new();

        let order = slice
            .create_order(&store, &cancel, checkout(vec![item("1", 1299), item("2", 1599)]))
            .await
            .expect("create");

        assert_eq!(order.total_amount, Price::from_cents(2898));
        assert_eq!(order.status, OrderStatus::Confirmed);
        assert_eq!(order.date, Utc::now().date_naive());
    }

    #[tokio::test]
    async fn test_update_status_missing_order_is_not_found() {
        let store = ObjectStore::open_in_memory().await.expect("store");
        let cancel = CancellationToken::new();
        let mut slice = OrdersSlice::new();

        let result = slice
            .update_order_status(
                &store,
                &cancel,
                &OrderId::new("missing"),
                OrderStatus::Cancelled,
            )
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_status_replaces_in_place() {
        let store = ObjectStore::open_in_memory().await.expect("store");
        let cancel = CancellationToken::new();
        let mut slice = OrdersSlice::new();

        let order = slice
            .create_order(&store, &cancel, checkout(vec![item("1", 1299)]))
            .await
            .expect("create");

        let updated = slice
            .update_order_status(&store, &cancel, &order.id, OrderStatus::Cancelled)
            .await
            .expect("update");

        assert_eq!(updated.status, OrderStatus::Cancelled);
        assert_eq!(slice.state().orders.len(), 1);
        assert_eq!(
            slice.state().orders.first().map(|o| o.status),
            Some(OrderStatus::Cancelled)
        );
    }
}
