//! Service Layer Error Types
//!
//! This module defines error types for service-layer operations. The
//! reorder-specific variants encode the saga contract: two independent
//! row writes with explicit partial-failure reporting instead of a
//! pretended transaction.

use crate::db::StoreError;
use crate::models::ValidationError;
use crate::session::AuthError;
use thiserror::Error;

/// Service operation errors
///
/// Callers are expected to match on the reorder variants: `NotFound`
/// means re-fetch and retry (the item is gone), `StoreUnavailable` means
/// the whole operation is safe to retry from a fresh snapshot, and
/// `PartialReorderFailure` means the local snapshot is untrustworthy and
/// the authoritative order must be re-read before any further reorder.
#[derive(Error, Debug)]
pub enum ContentServiceError {
    /// Referenced item absent from the snapshot or the store
    #[error("Item not found: {id}")]
    NotFound { id: String },

    /// One of the two reorder writes failed after the other succeeded
    ///
    /// No automatic rollback is attempted: compensation would itself be a
    /// write that can fail. The caller must re-fetch the authoritative
    /// order before allowing further reorder actions.
    #[error("Reorder partially applied: '{written_id}' was updated but '{failed_id}' was not: {source}")]
    PartialReorderFailure {
        written_id: String,
        failed_id: String,
        #[source]
        source: StoreError,
    },

    /// Both reorder writes failed; no row was modified
    #[error("Content store unavailable: {0}")]
    StoreUnavailable(#[source] StoreError),

    /// The two snapshot rows share a display_order, so swapping their
    /// values cannot change the derived order
    #[error("Cannot swap '{first_id}' and '{second_id}': both have display_order {display_order}")]
    OrderCollision {
        first_id: String,
        second_id: String,
        display_order: i64,
    },

    /// Validation failed for a content record
    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    /// Store operation failed
    #[error("Store operation failed: {0}")]
    Store(#[from] StoreError),

    /// Admin operation attempted without an active session
    #[error("No active session")]
    Unauthorized,
}

impl ContentServiceError {
    /// Create a not found error
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Create a partial reorder failure
    pub fn partial_reorder(
        written_id: impl Into<String>,
        failed_id: impl Into<String>,
        source: StoreError,
    ) -> Self {
        Self::PartialReorderFailure {
            written_id: written_id.into(),
            failed_id: failed_id.into(),
            source,
        }
    }

    /// Create an order collision error
    pub fn order_collision(
        first_id: impl Into<String>,
        second_id: impl Into<String>,
        display_order: i64,
    ) -> Self {
        Self::OrderCollision {
            first_id: first_id.into(),
            second_id: second_id.into(),
            display_order,
        }
    }
}

impl From<AuthError> for ContentServiceError {
    fn from(_: AuthError) -> Self {
        Self::Unauthorized
    }
}
