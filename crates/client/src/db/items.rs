//! Lunch item collection operations.

use sqlx::SqlitePool;

use lunchbox_core::{ItemId, Price};

use super::StoreError;
use crate::models::LunchItem;

/// Internal row type for lunch item queries.
#[derive(Debug, sqlx::FromRow)]
struct ItemRow {
    id: String,
    name: String,
    price: String,
    description: Option<String>,
    category: Option<String>,
    available: bool,
}

impl TryFrom<ItemRow> for LunchItem {
    type Error = StoreError;

    fn try_from(row: ItemRow) -> Result<Self, Self::Error> {
        let price = Price::parse(&row.price).map_err(|e| {
            StoreError::DataCorruption(format!("invalid price in lunch_items: {e}"))
        })?;

        Ok(Self {
            id: ItemId::new(row.id),
            name: row.name,
            price,
            description: row.description,
            category: row.category,
            available: row.available,
        })
    }
}

/// Repository for the `lunch_items` collection.
pub struct ItemRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ItemRepository<'a> {
    pub(crate) const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all catalog items.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the query fails.
    /// Returns `StoreError::DataCorruption` if a stored record is invalid.
    pub async fn list(&self) -> Result<Vec<LunchItem>, StoreError> {
        let rows = sqlx::query_as::<_, ItemRow>(
            "SELECT id, name, price, description, category, available FROM lunch_items ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(LunchItem::try_from).collect()
    }

    /// Get one item by id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the query fails.
    /// Returns `StoreError::DataCorruption` if the stored record is invalid.
    pub async fn get(&self, id: &ItemId) -> Result<Option<LunchItem>, StoreError> {
        let row = sqlx::query_as::<_, ItemRow>(
            "SELECT id, name, price, description, category, available FROM lunch_items WHERE id = ?1",
        )
        .bind(id.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(LunchItem::try_from).transpose()
    }

    /// Insert or replace an item (keyed by id).
    ///
    /// The price column stores the full-precision decimal amount
    /// (`Display` rounds to two digits, presentation only).
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the write fails.
    pub async fn put(&self, item: &LunchItem) -> Result<(), StoreError> {
        sqlx::query(
            r"
            INSERT INTO lunch_items (id, name, price, description, category, available)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                price = excluded.price,
                description = excluded.description,
                category = excluded.category,
                available = excluded.available
            ",
        )
        .bind(item.id.as_str())
        .bind(&item.name)
        .bind(item.price.amount().to_string())
        .bind(&item.description)
        .bind(&item.category)
        .bind(item.available)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Delete an item by id. Deleting an absent id is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the write fails.
    pub async fn delete(&self, id: &ItemId) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM lunch_items WHERE id = ?1")
            .bind(id.as_str())
            .execute(self.pool)
            .await?;

        Ok(())
    }
}
