//! ContentStore Trait - Persistence Abstraction Layer
//!
//! This module defines the `ContentStore` trait that abstracts row
//! persistence for content items. The trait sits between the services
//! (reorder, content) and the storage backend, so the embedded libsql
//! store used here and a hosted relational backend are interchangeable.
//!
//! # Design Decisions
//!
//! 1. **Async-First**: all methods are async to support both embedded and
//!    network backends
//! 2. **Independent row updates**: the trait deliberately offers no
//!    multi-row transaction. `update_order` writes one row's
//!    `display_order` with an absolute value; the reorder service builds
//!    its two-write protocol on top and reports partial failure explicitly
//! 3. **Typed errors**: `StoreError` lets callers classify failures

use crate::db::StoreError;
use crate::models::{Collection, Item, ItemUpdate};
use async_trait::async_trait;

/// Abstraction layer for content item persistence
///
/// Implementations must be `Send + Sync` so futures holding them can move
/// between runtime threads.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// List all items of a collection in the canonical ascending order
    ///
    /// Rows are returned sorted by `(display_order, id)` ascending. The
    /// `id` tiebreak keeps the order deterministic when `display_order`
    /// values transiently collide.
    async fn list_ordered(&self, collection: Collection) -> Result<Vec<Item>, StoreError>;

    /// Get an item by ID
    ///
    /// Returns `Ok(None)` when no row has the given ID.
    async fn get_item(&self, id: &str) -> Result<Option<Item>, StoreError>;

    /// Insert a new item
    ///
    /// Takes ownership of the item and returns it as stored.
    async fn insert_item(&self, item: Item) -> Result<Item, StoreError>;

    /// Apply a content-field patch to an item
    ///
    /// Never touches `display_order`; position changes go through
    /// [`update_order`](Self::update_order) exclusively.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::RowMissing` if the row does not exist.
    async fn update_item(&self, id: &str, update: ItemUpdate) -> Result<Item, StoreError>;

    /// Set one row's `display_order` to an absolute value
    ///
    /// Touches exactly the `display_order` column of exactly one row.
    /// Absolute values (rather than deltas) keep every write independently
    /// well-formed, so a racing writer can produce a stale order but never
    /// a corrupted row.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::RowMissing` if no row of the collection has
    /// the given ID.
    async fn update_order(
        &self,
        collection: Collection,
        id: &str,
        new_order: i64,
    ) -> Result<(), StoreError>;

    /// Highest `display_order` in a collection (0 when empty)
    ///
    /// Used at item-creation time to assign `max + 1` so new items sort
    /// last.
    async fn max_order(&self, collection: Collection) -> Result<i64, StoreError>;

    /// Delete an item by ID
    ///
    /// Idempotent: returns `Ok(false)` when the row was already gone.
    /// Surviving rows keep their `display_order` values; gaps are
    /// permitted.
    async fn delete_item(&self, id: &str) -> Result<bool, StoreError>;
}
