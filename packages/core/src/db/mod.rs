//! Content Store Layer
//!
//! This module handles all persistence for content items:
//!
//! - `ContentStore` trait abstracting the storage backend
//! - `SqliteStore`, the embedded libsql implementation
//!
//! # Architecture
//!
//! The store exposes independent row operations only. There is no
//! multi-row transaction in the contract: the reorder protocol in the
//! service layer is built as two absolute-value single-row writes with
//! explicit partial-failure reporting, which keeps the trait satisfiable
//! by hosted backends that only offer per-row updates.

mod content_store;
mod error;
mod sqlite_store;

pub use content_store::ContentStore;
pub use error::StoreError;
pub use sqlite_store::SqliteStore;
