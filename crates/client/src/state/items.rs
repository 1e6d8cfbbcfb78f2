//! Lunch item slice.

use tokio_util::sync::CancellationToken;

use lunchbox_core::ItemId;

use crate::db::ObjectStore;
use crate::error::AppError;
use crate::models::{LunchItem, NewLunchItem};

/// In-memory view of the catalog.
#[derive(Debug, Default)]
pub struct ItemsState {
    pub items: Vec<LunchItem>,
    pub loading: bool,
    pub error: Option<String>,
}

/// The catalog slice.
#[derive(Debug, Default)]
pub struct ItemsSlice {
    state: ItemsState,
}

impl ItemsSlice {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read access for views.
    #[must_use]
    pub const fn state(&self) -> &ItemsState {
        &self.state
    }

    /// Replace the in-memory catalog with the store's contents.
    ///
    /// Pending sets `loading` and clears `error`; fulfillment replaces the
    /// list wholesale; rejection records the error string for the UI.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Store` on a failed read (also surfaced via
    /// `state().error`), `AppError::Cancelled` if the token fired.
    pub async fn fetch_items(
        &mut self,
        store: &ObjectStore,
        cancel: &CancellationToken,
    ) -> Result<(), AppError> {
        self.state.loading = true;
        self.state.error = None;

        let result = store.items().list().await;
        self.state.loading = false;
        if cancel.is_cancelled() {
            return Err(AppError::Cancelled);
        }

        match result {
            Ok(items) => {
                self.state.items = items;
                Ok(())
            }
            Err(e) => {
                self.state.error = Some(e.to_string());
                Err(e.into())
            }
        }
    }

    /// Persist a new catalog item, then append it to the in-memory list.
    ///
    /// The id is timestamp-derived and `available` is forced to `true`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Store` if the durable write fails (state is left
    /// unchanged), `AppError::Cancelled` if the token fired.
    pub async fn add_item(
        &mut self,
        store: &ObjectStore,
        cancel: &CancellationToken,
        new: NewLunchItem,
    ) -> Result<LunchItem, AppError> {
        let item = new.into_item(ItemId::generate());

        let result = store.items().put(&item).await;
        if cancel.is_cancelled() {
            return Err(AppError::Cancelled);
        }
        result?;

        self.state.items.push(item.clone());
        Ok(item)
    }

    /// Persist an edited item, then replace it in place in memory.
    ///
    /// If the id is no longer in the in-memory list (deleted concurrently)
    /// the reduction is a silent no-op.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Store` if the durable write fails,
    /// `AppError::Cancelled` if the token fired.
    pub async fn update_item(
        &mut self,
        store: &ObjectStore,
        cancel: &CancellationToken,
        item: LunchItem,
    ) -> Result<(), AppError> {
        let result = store.items().put(&item).await;
        if cancel.is_cancelled() {
            return Err(AppError::Cancelled);
        }
        result?;

        if let Some(slot) = self.state.items.iter_mut().find(|i| i.id == item.id) {
            *slot = item;
        }
        Ok(())
    }

    /// Delete an item durably, then drop it from the in-memory list.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Store` if the durable write fails,
    /// `AppError::Cancelled` if the token fired.
    pub async fn delete_item(
        &mut self,
        store: &ObjectStore,
        cancel: &CancellationToken,
        id: &ItemId,
    ) -> Result<(), AppError> {
        let result = store.items().delete(id).await;
        if cancel.is_cancelled() {
            return Err(AppError::Cancelled);
        }
        result?;

        self.state.items.retain(|i| i.id != *id);
        Ok(())
    }
}
