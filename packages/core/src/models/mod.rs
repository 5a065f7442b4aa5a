//! Data Models
//!
//! This module contains the core data structures used throughout Folio:
//!
//! - `Item` - Universal content item for all collections
//! - Typed record wrappers (ProjectRecord, ArticleRecord, AboutRecord)
//!   validated at construction time
//!
//! All collections share the universal `items` table, with collection
//! specific data stored in the `properties` field.

mod about;
mod article;
mod item;
mod project;

pub use about::{AboutRecord, AboutRecordBuilder};
pub use article::{ArticleRecord, ArticleRecordBuilder};
pub use item::{
    ascending_view, compare_display_position, Collection, Item, ItemUpdate, ValidationError,
};
pub use project::{ProjectRecord, ProjectRecordBuilder};
