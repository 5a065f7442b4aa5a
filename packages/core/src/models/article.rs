//! Type-Safe Article Record Wrapper
//!
//! Validated access to article properties over the universal Item model.
//! Articles carry a card summary plus the long-form body rendered on the
//! detail page (`content` property, matching the stored column name).

use crate::models::item::{require_str, require_str_list};
use crate::models::{Collection, Item, ValidationError};
use serde_json::json;

/// Type-safe wrapper for article rows
pub struct ArticleRecord {
    item: Item,
}

impl ArticleRecord {
    /// Start building a new article
    #[allow(clippy::new_ret_no_self)]
    pub fn new(title: String, summary: String) -> ArticleRecordBuilder {
        ArticleRecordBuilder {
            title,
            summary,
            content: String::new(),
            image: String::new(),
            tags: Vec::new(),
            date: String::new(),
        }
    }

    /// Create an ArticleRecord from a stored Item
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the item is not an articles row, its
    /// title is empty, or any required property (`summary`, `content`,
    /// `image`, `tags`, `date`) is missing or ill-typed.
    pub fn from_item(item: Item) -> Result<Self, ValidationError> {
        if item.collection != Collection::Articles {
            return Err(ValidationError::wrong_collection(
                Collection::Articles.as_str(),
                item.collection.as_str(),
            ));
        }
        if item.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }

        require_str(&item.properties, "summary")?;
        require_str(&item.properties, "content")?;
        require_str(&item.properties, "image")?;
        require_str_list(&item.properties, "tags")?;
        require_str(&item.properties, "date")?;

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

    /// Card summary
    pub fn summary(&self) -> String {
        require_str(&self.item.properties, "summary").unwrap_or_default()
    }

    /// Long-form body
    pub fn content(&self) -> String {
        require_str(&self.item.properties, "content").unwrap_or_default()
    }

    /// Cover image URL
    pub fn image(&self) -> String {
        require_str(&self.item.properties, "image").unwrap_or_default()
    }

    /// Filter tags
    pub fn tags(&self) -> Vec<String> {
        require_str_list(&self.item.properties, "tags").unwrap_or_default()
    }

    /// Human-readable publication date
    pub fn date(&self) -> String {
        require_str(&self.item.properties, "date").unwrap_or_default()
    }
}

/// Builder for [`ArticleRecord`]
pub struct ArticleRecordBuilder {
    title: String,
    summary: String,
    content: String,
    image: String,
    tags: Vec<String>,
    date: String,
}

impl ArticleRecordBuilder {
    /// Set the long-form body
    pub fn content(mut self, content: String) -> Self {
        self.content = content;
        self
    }

    /// Set the cover image URL
    pub fn image(mut self, image: String) -> Self {
        self.image = image;
        self
    }

    /// Set the filter tags
    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Set the human-readable publication date
    pub fn date(mut self, date: String) -> Self {
        self.date = date;
        self
    }

    /// Build the ArticleRecord
    ///
    /// The item is created with `display_order = 0`; the content service
    /// assigns the real position (`max + 1`) at insert time.
    pub fn build(self) -> ArticleRecord {
        let properties = json!({
            "summary": self.summary,
            "content": self.content,
            "image": self.image,
            "tags": self.tags,
            "date": self.date,
        });

        ArticleRecord {
            item: Item::new(Collection::Articles, self.title, 0, properties),
        }
    }
}

#[cfg(test)]
#[path = "article_test.rs"]
mod article_test;
