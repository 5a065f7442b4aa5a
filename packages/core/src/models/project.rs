//! Type-Safe Project Record Wrapper
//!
//! Provides validated access to project properties while maintaining the
//! universal Item storage model. Construction from a stored row rejects
//! wrong-collection rows and missing or ill-typed required fields instead
//! of trusting the store's shape at every call site.
//!
//! # Examples
//!
//! ```rust
//! use folio_core::models::ProjectRecord;
//!
//! let project = ProjectRecord::new(
//!     "Packet visualizer".to_string(),
//!     "Live packet capture rendered as a force graph".to_string(),
//! )
//! .image("/img/packets.png".to_string())
//! .tags(vec!["rust".to_string(), "networking".to_string()])
//! .github("https://github.com/folio-site/packets".to_string())
//! .build();
//!
//! assert_eq!(project.as_item().title, "Packet visualizer");
//! ```

use crate::models::item::{optional_str, require_str, require_str_list};
use crate::models::{Collection, Item, ValidationError};
use serde_json::json;

/// Type-safe wrapper for project rows
pub struct ProjectRecord {
    item: Item,
}

impl ProjectRecord {
    /// Start building a new project
    #[allow(clippy::new_ret_no_self)]
    pub fn new(title: String, description: String) -> ProjectRecordBuilder {
        ProjectRecordBuilder {
            title,
            description,
            full_description: String::new(),
            image: String::new(),
            images: Vec::new(),
            tags: Vec::new(),
            github: None,
            demo: None,
            date: String::new(),
        }
    }

    /// Create a ProjectRecord from a stored Item
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the item is not a projects row, its
    /// title is empty, or any required property (`description`,
    /// `full_description`, `image`, `images`, `tags`, `date`) is missing
    /// or ill-typed.
    pub fn from_item(item: Item) -> Result<Self, ValidationError> {
        if item.collection != Collection::Projects {
            return Err(ValidationError::wrong_collection(
                Collection::Projects.as_str(),
                item.collection.as_str(),
            ));
        }
        if item.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }

        require_str(&item.properties, "description")?;
        require_str(&item.properties, "full_description")?;
        require_str(&item.properties, "image")?;
        require_str_list(&item.properties, "images")?;
        require_str_list(&item.properties, "tags")?;
        require_str(&item.properties, "date")?;
        optional_str(&item.properties, "github")?;
        optional_str(&item.properties, "demo")?;

        Ok(Self { item })
    }

    /// Get immutable reference to the underlying universal Item
    pub fn as_item(&self) -> &Item {
        &self.item
    }

    /// Consume the wrapper, returning the universal Item for storage
    pub fn into_item(self) -> Item {
        self.item
    }

    /// Short description shown on cards
    pub fn description(&self) -> String {
        require_str(&self.item.properties, "description").unwrap_or_default()
    }

    /// Long-form description shown on the detail page
    pub fn full_description(&self) -> String {
        require_str(&self.item.properties, "full_description").unwrap_or_default()
    }

    /// Cover image URL
    pub fn image(&self) -> String {
        require_str(&self.item.properties, "image").unwrap_or_default()
    }

    /// Gallery image URLs
    pub fn images(&self) -> Vec<String> {
        require_str_list(&self.item.properties, "images").unwrap_or_default()
    }

    /// Filter tags
    pub fn tags(&self) -> Vec<String> {
        require_str_list(&self.item.properties, "tags").unwrap_or_default()
    }

    /// Source repository link, if published
    pub fn github(&self) -> Option<String> {
        optional_str(&self.item.properties, "github").unwrap_or_default()
    }

    /// Live demo link, if deployed
    pub fn demo(&self) -> Option<String> {
        optional_str(&self.item.properties, "demo").unwrap_or_default()
    }

    /// Human-readable project date
    pub fn date(&self) -> String {
        require_str(&self.item.properties, "date").unwrap_or_default()
    }
}

/// Builder for [`ProjectRecord`]
pub struct ProjectRecordBuilder {
    title: String,
    description: String,
    full_description: String,
    image: String,
    images: Vec<String>,
    tags: Vec<String>,
    github: Option<String>,
    demo: Option<String>,
    date: String,
}

impl ProjectRecordBuilder {
    /// Set the long-form description
    pub fn full_description(mut self, full_description: String) -> Self {
        self.full_description = full_description;
        self
    }

    /// Set the cover image URL
    pub fn image(mut self, image: String) -> Self {
        self.image = image;
        self
    }

    /// Set the gallery image URLs
    pub fn images(mut self, images: Vec<String>) -> Self {
        self.images = images;
        self
    }

    /// Set the filter tags
    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Set the source repository link
    pub fn github(mut self, github: String) -> Self {
        self.github = Some(github);
        self
    }

    /// Set the live demo link
    pub fn demo(mut self, demo: String) -> Self {
        self.demo = Some(demo);
        self
    }

    /// Set the human-readable project date
    pub fn date(mut self, date: String) -> Self {
        self.date = date;
        self
    }

    /// Build the ProjectRecord
    ///
    /// The item is created with `display_order = 0`; the content service
    /// assigns the real position (`max + 1`) at insert time.
    pub fn build(self) -> ProjectRecord {
        let properties = json!({
            "description": self.description,
            "full_description": self.full_description,
            "image": self.image,
            "images": self.images,
            "tags": self.tags,
            "github": self.github,
            "demo": self.demo,
            "date": self.date,
        });

        ProjectRecord {
            item: Item::new(Collection::Projects, self.title, 0, properties),
        }
    }
}

#[cfg(test)]
#[path = "project_test.rs"]
mod project_test;
