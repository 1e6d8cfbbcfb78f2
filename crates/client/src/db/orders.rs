//! Order collection operations.
//!
//! Orders carry their item list as a JSON column: a denormalized snapshot
//! taken at checkout, deliberately decoupled from later catalog edits.

use chrono::NaiveDate;
use sqlx::SqlitePool;

use lunchbox_core::{OrderId, OrderStatus, Price, UserId};

use super::StoreError;
use crate::models::{LunchItem, Order};

const SELECT_COLUMNS: &str = "id, user_id, user_name, date, items, total_amount, status";

/// Internal row type for order queries.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: String,
    user_id: String,
    user_name: String,
    date: String,
    items: String,
    total_amount: String,
    status: String,
}

impl TryFrom<OrderRow> for Order {
    type Error = StoreError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let date = NaiveDate::parse_from_str(&row.date, "%Y-%m-%d")
            .map_err(|e| StoreError::DataCorruption(format!("invalid date in orders: {e}")))?;

        let items: Vec<LunchItem> = serde_json::from_str(&row.items)
            .map_err(|e| StoreError::DataCorruption(format!("invalid item list in orders: {e}")))?;

        let total_amount = Price::parse(&row.total_amount)
            .map_err(|e| StoreError::DataCorruption(format!("invalid total in orders: {e}")))?;

        let status = OrderStatus::parse(&row.status).ok_or_else(|| {
            StoreError::DataCorruption(format!("unknown order status: {}", row.status))
        })?;

        Ok(Self {
            id: OrderId::new(row.id),
            user_id: UserId::new(row.user_id),
            user_name: row.user_name,
            date,
            items,
            total_amount,
            status,
        })
    }
}

/// Repository for the `orders` collection.
pub struct OrderRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> OrderRepository<'a> {
    pub(crate) const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all orders.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the query fails.
    /// Returns `StoreError::DataCorruption` if a stored record is invalid.
    pub async fn list(&self) -> Result<Vec<Order>, StoreError> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM orders ORDER BY id"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Order::try_from).collect()
    }

    /// List the orders placed by one user (served by the `user_id` index).
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the query fails.
    /// Returns `StoreError::DataCorruption` if a stored record is invalid.
    pub async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Order>, StoreError> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM orders WHERE user_id = ?1 ORDER BY id"
        ))
        .bind(user_id.as_str())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Order::try_from).collect()
    }

    /// List the orders placed on one date (served by the `date` index).
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the query fails.
    /// Returns `StoreError::DataCorruption` if a stored record is invalid.
    pub async fn list_for_date(&self, date: NaiveDate) -> Result<Vec<Order>, StoreError> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM orders WHERE date = ?1 ORDER BY id"
        ))
        .bind(date.to_string())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Order::try_from).collect()
    }

    /// Get one order by id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the query fails.
    /// Returns `StoreError::DataCorruption` if the stored record is invalid.
    pub async fn get(&self, id: &OrderId) -> Result<Option<Order>, StoreError> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM orders WHERE id = ?1"
        ))
        .bind(id.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(Order::try_from).transpose()
    }

    /// Insert or replace an order (keyed by id).
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Serialization` if the item snapshot cannot be
    /// encoded, `StoreError::Database` if the write fails.
    pub async fn put(&self, order: &Order) -> Result<(), StoreError> {
        let items = serde_json::to_string(&order.items)?;

        sqlx::query(
            r"
            INSERT INTO orders (id, user_id, user_name, date, items, total_amount, status)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT(id) DO UPDATE SET
                user_id = excluded.user_id,
                user_name = excluded.user_name,
                date = excluded.date,
                items = excluded.items,
                total_amount = excluded.total_amount,
                status = excluded.status
            ",
        )
        .bind(order.id.as_str())
        .bind(order.user_id.as_str())
        .bind(&order.user_name)
        .bind(order.date.to_string())
        .bind(items)
        .bind(order.total_amount.amount().to_string())
        .bind(order.status.as_str())
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Delete an order by id. Deleting an absent id is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the write fails.
    pub async fn delete(&self, id: &OrderId) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM orders WHERE id = ?1")
            .bind(id.as_str())
            .execute(self.pool)
            .await?;

        Ok(())
    }
}
