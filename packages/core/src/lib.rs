//! Folio Core Content Layer
//!
//! This crate provides the content management core for the Folio portfolio
//! site and its admin panel: typed content records, the content store
//! abstraction, and the services the admin views call.
//!
//! # Architecture
//!
//! - **Universal Item**: one storage row shape for all collections, with
//!   collection-specific fields in a `properties` JSON column
//! - **Typed records**: per-collection wrappers validated at construction
//! - **libsql**: embedded SQLite-compatible database behind a `ContentStore`
//!   trait, so the hosted backend can be swapped in without touching the
//!   services
//! - **Swap-based reordering**: admin list ordering is a sparse integer
//!   `display_order` column mutated only by the reorder service
//!
//! # Modules
//!
//! - [`models`] - Data structures (Item, typed record wrappers)
//! - [`db`] - Content store trait and libsql implementation
//! - [`services`] - Reorder and content services called by the admin views
//! - [`session`] - Explicit session lifecycle over an external auth provider

pub mod db;
pub mod models;
pub mod services;
pub mod session;

// Re-export commonly used types
pub use db::*;
pub use models::*;
pub use services::*;
