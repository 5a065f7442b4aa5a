//! Universal Content Item
//!
//! This module defines the core `Item` struct shared by every content
//! collection (projects, articles, about-info).
//!
//! # Architecture
//!
//! - **Universal Item**: a single struct represents all content types
//! - **Properties JSON**: collection-specific fields live in `properties`
//! - **Sparse ordering**: `display_order` is an integer that only needs to
//!   be meaningful relative to other rows of the same collection; gaps are
//!   permitted and deletion never renumbers survivors
//!
//! # Examples
//!
//! ```rust
//! use folio_core::models::{Collection, Item};
//! use serde_json::json;
//!
//! let item = Item::new(
//!     Collection::Projects,
//!     "Packet visualizer".to_string(),
//!     1,
//!     json!({ "description": "Live packet capture views", "tags": ["rust"] }),
//! );
//!
//! assert_eq!(item.collection, Collection::Projects);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Validation errors for typed content records
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Field '{field}' has invalid type: expected {expected}")]
    InvalidFieldType {
        field: String,
        expected: &'static str,
    },

    #[error("Wrong collection: expected '{expected}', got '{actual}'")]
    WrongCollection {
        expected: &'static str,
        actual: String,
    },

    #[error("Unknown collection: {0}")]
    UnknownCollection(String),

    #[error("Title must not be empty")]
    EmptyTitle,
}

impl ValidationError {
    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField(field.into())
    }

    /// Create an invalid field type error
    pub fn invalid_field_type(field: impl Into<String>, expected: &'static str) -> Self {
        Self::InvalidFieldType {
            field: field.into(),
            expected,
        }
    }

    /// Create a wrong collection error
    pub fn wrong_collection(expected: &'static str, actual: impl Into<String>) -> Self {
        Self::WrongCollection {
            expected,
            actual: actual.into(),
        }
    }
}

/// Content collections known to the store
///
/// Each collection is ordered independently: the `display_order` of a
/// project says nothing about the position of any article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Projects,
    Articles,
    About,
}

impl Collection {
    /// Stable string form used as the `collection` column value
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Projects => "projects",
            Collection::Articles => "articles",
            Collection::About => "about",
        }
    }

    /// Parse the stored string form back into a collection
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s {
            "projects" => Ok(Collection::Projects),
            "articles" => Ok(Collection::Articles),
            "about" => Ok(Collection::About),
            other => Err(ValidationError::UnknownCollection(other.to_string())),
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Universal content item
///
/// # Fields
///
/// - `id`: opaque unique identifier (UUIDv4), immutable after creation
/// - `collection`: which content collection the item belongs to
/// - `title`: primary label shown in list views
/// - `display_order`: position within the collection; sparse integer,
///   only relative order matters
/// - `created_at` / `updated_at`: timestamps
/// - `properties`: JSON object with all collection-specific fields
///
/// Collection-specific access goes through the typed wrappers
/// ([`ProjectRecord`](crate::models::ProjectRecord),
/// [`ArticleRecord`](crate::models::ArticleRecord),
/// [`AboutRecord`](crate::models::AboutRecord)), which validate the
/// properties shape at construction instead of trusting the store at
/// every call site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier (UUIDv4)
    pub id: String,

    /// Owning collection
    pub collection: Collection,

    /// Primary label
    pub title: String,

    /// Position within the collection (sparse, gaps permitted)
    pub display_order: i64,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,

    /// All collection-specific fields
    pub properties: Value,
}

impl Item {
    /// Create a new Item with an auto-generated UUID
    pub fn new(collection: Collection, title: String, display_order: i64, properties: Value) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4().to_string(),
            collection,
            title,
            display_order,
            created_at: now,
            updated_at: now,
            properties,
        }
    }

    /// Create a new Item with an explicit ID (used by tests and imports)
    pub fn new_with_id(
        id: String,
        collection: Collection,
        title: String,
        display_order: i64,
        properties: Value,
    ) -> Self {
        let now = Utc::now();

        Self {
            id,
            collection,
            title,
            display_order,
            created_at: now,
            updated_at: now,
            properties,
        }
    }
}

/// Content-field patch applied by ordinary edits
///
/// Edits never touch `display_order`; position changes go through the
/// reorder service exclusively.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemUpdate {
    /// New title, if changed
    pub title: Option<String>,

    /// Replacement properties object, if changed
    pub properties: Option<Value>,
}

/// Materialize the canonical ascending view of a collection
///
/// Sorts by `(display_order, id)`. The `id` tiebreak keeps the view
/// deterministic even when two rows transiently share a `display_order`
/// (possible while a racing reorder from another session is in flight),
/// so equal data always renders in the same order.
pub fn ascending_view(mut items: Vec<Item>) -> Vec<Item> {
    items.sort_by(compare_display_position);
    items
}

/// Ordering used by [`ascending_view`]
pub fn compare_display_position(a: &Item, b: &Item) -> Ordering {
    a.display_order
        .cmp(&b.display_order)
        .then_with(|| a.id.cmp(&b.id))
}

//
// Property access helpers shared by the typed record wrappers
//

pub(crate) fn require_str(properties: &Value, field: &str) -> Result<String, ValidationError> {
    match properties.get(field) {
        None | Some(Value::Null) => Err(ValidationError::missing_field(field)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(ValidationError::invalid_field_type(field, "string")),
    }
}

pub(crate) fn require_str_list(
    properties: &Value,
    field: &str,
) -> Result<Vec<String>, ValidationError> {
    let value = match properties.get(field) {
        None | Some(Value::Null) => return Err(ValidationError::missing_field(field)),
        Some(v) => v,
    };

    let entries = value
        .as_array()
        .ok_or_else(|| ValidationError::invalid_field_type(field, "array of strings"))?;

    entries
        .iter()
        .map(|entry| {
            entry
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| ValidationError::invalid_field_type(field, "array of strings"))
        })
        .collect()
}

pub(crate) fn optional_str(
    properties: &Value,
    field: &str,
) -> Result<Option<String>, ValidationError> {
    match properties.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ValidationError::invalid_field_type(field, "string or null")),
    }
}

pub(crate) fn optional_str_list(
    properties: &Value,
    field: &str,
) -> Result<Vec<String>, ValidationError> {
    match properties.get(field) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(_) => require_str_list(properties, field),
    }
}
