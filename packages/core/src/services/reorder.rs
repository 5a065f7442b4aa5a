//! Reorder Service - swap-based display_order protocol
//!
//! Maintains the strict total order of a collection by exchanging the
//! `display_order` values of an item and its adjacent neighbor in response
//! to the admin list view's move-up/move-down controls.
//!
//! # Why This Shape
//!
//! The content store offers independent row updates only, no multi-row
//! transaction. The protocol is therefore a saga of two absolute-value
//! single-row writes:
//!
//! - Each write fully specifies the row's new `display_order`, so any
//!   interleaving with a racing reorder from another session produces at
//!   worst a stale order on the next read, never a corrupted row.
//! - Partial failure is reported, not compensated: rolling back the
//!   succeeded half would be another write that can also fail. The caller
//!   re-reads the authoritative order instead.
//!
//! Once both writes are issued the operation cannot be cancelled;
//! abandoning the await does not undo them.

use crate::db::ContentStore;
use crate::models::{ascending_view, Collection, Item};
use crate::services::ContentServiceError;
use std::sync::Arc;

/// Direction of a move request from the admin list view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Exchange with the previous item in the ascending view
    Up,
    /// Exchange with the next item in the ascending view
    Down,
}

/// Service applying swap-based reorders to a collection
pub struct ReorderService {
    store: Arc<dyn ContentStore>,
}

impl ReorderService {
    /// Create a new ReorderService over the given store
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    /// Exchange an item's position with its adjacent neighbor
    ///
    /// `snapshot` is the collection as currently rendered, sorted ascending
    /// by `(display_order, id)`; the item and neighbor are resolved against
    /// it, and the updated sequence returned on success is derived from it.
    ///
    /// # Edge-case policy
    ///
    /// - Unknown `item_id`: fails with `NotFound`, zero writes issued.
    /// - `Up` on the first item / `Down` on the last: no-op returning the
    ///   snapshot unchanged. The UI disables the control at the boundary,
    ///   but a stale click must not become an error.
    ///
    /// # Errors
    ///
    /// - `OrderCollision` if the two rows already share a `display_order`
    ///   (swapping equal values cannot change the derived order; the
    ///   caller should re-fetch, the collision is transient).
    /// - `StoreUnavailable` if both writes failed (retry from a fresh
    ///   snapshot is safe; no row was modified).
    /// - `PartialReorderFailure` if exactly one write failed (the local
    ///   snapshot is now untrustworthy; re-fetch before further reorders).
    pub async fn reorder(
        &self,
        collection: Collection,
        snapshot: &[Item],
        item_id: &str,
        direction: Direction,
    ) -> Result<Vec<Item>, ContentServiceError> {
        let index = snapshot
            .iter()
            .position(|item| item.id == item_id)
            .ok_or_else(|| ContentServiceError::not_found(item_id))?;

        let neighbor_index = match direction {
            Direction::Up if index == 0 => return Ok(snapshot.to_vec()),
            Direction::Down if index == snapshot.len() - 1 => return Ok(snapshot.to_vec()),
            Direction::Up => index - 1,
            Direction::Down => index + 1,
        };

        let item = &snapshot[index];
        let neighbor = &snapshot[neighbor_index];

        if item.display_order == neighbor.display_order {
            return Err(ContentServiceError::order_collision(
                &item.id,
                &neighbor.id,
                item.display_order,
            ));
        }

        let item_target = neighbor.display_order;
        let neighbor_target = item.display_order;

        // Both writes in flight at once; the operation settles when both do.
        let (item_write, neighbor_write) = tokio::join!(
            self.store.update_order(collection, &item.id, item_target),
            self.store
                .update_order(collection, &neighbor.id, neighbor_target),
        );

        match (item_write, neighbor_write) {
            (Ok(()), Ok(())) => {}
            (Err(first), Err(second)) => {
                tracing::warn!(
                    "Reorder of '{}' in {} failed on both writes: {} / {}",
                    item.id,
                    collection,
                    first,
                    second
                );
                return Err(ContentServiceError::StoreUnavailable(first));
            }
            (Err(source), Ok(())) => {
                tracing::warn!(
                    "Reorder of '{}' in {} partially applied: neighbor '{}' written, item write failed: {}",
                    item.id,
                    collection,
                    neighbor.id,
                    source
                );
                return Err(ContentServiceError::partial_reorder(
                    &neighbor.id,
                    &item.id,
                    source,
                ));
            }
            (Ok(()), Err(source)) => {
                tracing::warn!(
                    "Reorder of '{}' in {} partially applied: item written, neighbor '{}' write failed: {}",
                    item.id,
                    collection,
                    neighbor.id,
                    source
                );
                return Err(ContentServiceError::partial_reorder(
                    &item.id,
                    &neighbor.id,
                    source,
                ));
            }
        }

        tracing::debug!(
            "Swapped display_order of '{}' ({} -> {}) and '{}' ({} -> {}) in {}",
            item.id,
            neighbor_target,
            item_target,
            neighbor.id,
            item_target,
            neighbor_target,
            collection
        );

        let mut updated = snapshot.to_vec();
        updated[index].display_order = item_target;
        updated[neighbor_index].display_order = neighbor_target;

        Ok(ascending_view(updated))
    }
}

#[cfg(test)]
#[path = "reorder_test.rs"]
mod reorder_test;
