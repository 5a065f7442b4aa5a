//! Business Services
//!
//! This module contains the services the admin panel and public pages
//! call:
//!
//! - `ReorderService` - swap-based display_order protocol for the admin
//!   list views' move-up/move-down controls
//! - `ContentService` - CRUD over the content collections with the
//!   append-at-end ordering rule
//!
//! Services coordinate between the content store and the view layer,
//! implementing the ordering and partial-failure rules.

pub mod content;
pub mod error;
pub mod reorder;

pub use content::ContentService;
pub use error::ContentServiceError;
pub use reorder::{Direction, ReorderService};
