//! Content Service
//!
//! CRUD operations over the content collections, called by the admin
//! panel and the public pages. Admin mutations require an active session
//! from the injected [`SessionManager`]; public reads do not.
//!
//! Ordering rules enforced here:
//!
//! - New items are created with `display_order = max(collection) + 1`,
//!   so they sort last.
//! - Content edits never touch `display_order`.
//! - Deletion does not renumber survivors; gaps are permitted.

use crate::db::ContentStore;
use crate::models::{
    ascending_view, AboutRecord, ArticleRecord, Collection, Item, ItemUpdate, ProjectRecord,
};
use crate::services::ContentServiceError;
use crate::session::SessionManager;
use std::sync::Arc;

/// Service for content CRUD and canonical views
pub struct ContentService {
    store: Arc<dyn ContentStore>,
    sessions: Arc<SessionManager>,
}

impl ContentService {
    /// Create a new ContentService
    pub fn new(store: Arc<dyn ContentStore>, sessions: Arc<SessionManager>) -> Self {
        Self { store, sessions }
    }

    /// Canonical ascending view of a collection (public read)
    ///
    /// The store already sorts, but the view is re-derived locally so the
    /// `(display_order, id)` contract holds even for a backend that only
    /// sorts on `display_order`.
    pub async fn list(&self, collection: Collection) -> Result<Vec<Item>, ContentServiceError> {
        let items = self.store.list_ordered(collection).await?;
        Ok(ascending_view(items))
    }

    /// Point lookup (public read)
    pub async fn get(&self, id: &str) -> Result<Item, ContentServiceError> {
        self.store
            .get_item(id)
            .await?
            .ok_or_else(|| ContentServiceError::not_found(id))
    }

    /// Create a project, appending it to the collection
    pub async fn create_project(
        &self,
        record: ProjectRecord,
    ) -> Result<ProjectRecord, ContentServiceError> {
        let item = self.create(record.into_item()).await?;
        Ok(ProjectRecord::from_item(item)?)
    }

    /// Create an article, appending it to the collection
    pub async fn create_article(
        &self,
        record: ArticleRecord,
    ) -> Result<ArticleRecord, ContentServiceError> {
        let item = self.create(record.into_item()).await?;
        Ok(ArticleRecord::from_item(item)?)
    }

    /// Patch a project, rejecting patches that break the record shape
    ///
    /// The patched row is validated before anything is written, so a
    /// rejected patch leaves the stored row untouched.
    pub async fn update_project(
        &self,
        id: &str,
        update: ItemUpdate,
    ) -> Result<ProjectRecord, ContentServiceError> {
        self.sessions.require_admin().await?;

        ProjectRecord::from_item(self.patched(id, &update).await?)?;
        let item = self.update(id, update).await?;
        Ok(ProjectRecord::from_item(item)?)
    }

    /// Patch an article, rejecting patches that break the record shape
    ///
    /// Validates before writing, like
    /// [`update_project`](Self::update_project).
    pub async fn update_article(
        &self,
        id: &str,
        update: ItemUpdate,
    ) -> Result<ArticleRecord, ContentServiceError> {
        self.sessions.require_admin().await?;

        ArticleRecord::from_item(self.patched(id, &update).await?)?;
        let item = self.update(id, update).await?;
        Ok(ArticleRecord::from_item(item)?)
    }

    /// Apply a content-field patch to an item
    ///
    /// Position is out of reach by construction: `ItemUpdate` carries no
    /// `display_order`.
    pub async fn update(
        &self,
        id: &str,
        update: ItemUpdate,
    ) -> Result<Item, ContentServiceError> {
        self.sessions.require_admin().await?;

        match self.store.update_item(id, update).await {
            Ok(item) => Ok(item),
            Err(crate::db::StoreError::RowMissing { id }) => {
                Err(ContentServiceError::NotFound { id })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Delete an item; survivors keep their display_order values
    pub async fn delete(&self, id: &str) -> Result<bool, ContentServiceError> {
        self.sessions.require_admin().await?;
        Ok(self.store.delete_item(id).await?)
    }

    /// The about-info row, if one has been saved
    pub async fn get_about(&self) -> Result<Option<AboutRecord>, ContentServiceError> {
        let row = self
            .store
            .list_ordered(Collection::About)
            .await?
            .into_iter()
            .next();

        match row {
            Some(item) => Ok(Some(AboutRecord::from_item(item)?)),
            None => Ok(None),
        }
    }

    /// Save the about-info row, replacing any existing one
    pub async fn save_about(
        &self,
        record: AboutRecord,
    ) -> Result<AboutRecord, ContentServiceError> {
        self.sessions.require_admin().await?;

        let replacement = record.into_item();

        // Single-row collection: an existing row is patched in place so
        // its id stays stable for the public page.
        let existing = self
            .store
            .list_ordered(Collection::About)
            .await?
            .into_iter()
            .next();

        let stored = match existing {
            Some(current) => {
                self.store
                    .update_item(
                        &current.id,
                        ItemUpdate {
                            title: Some(replacement.title),
                            properties: Some(replacement.properties),
                        },
                    )
                    .await?
            }
            None => self.store.insert_item(replacement).await?,
        };

        Ok(AboutRecord::from_item(stored)?)
    }

    /// Items carrying the given tag, order preserved
    ///
    /// Tag comparison is case-insensitive, matching the public pages'
    /// filter chips.
    pub fn filter_by_tag<'a>(items: &'a [Item], tag: &str) -> Vec<&'a Item> {
        items
            .iter()
            .filter(|item| {
                item.properties
                    .get("tags")
                    .and_then(|tags| tags.as_array())
                    .map(|tags| {
                        tags.iter()
                            .filter_map(|t| t.as_str())
                            .any(|t| t.eq_ignore_ascii_case(tag))
                    })
                    .unwrap_or(false)
            })
            .collect()
    }

    /// The item as it would look with the patch applied, without writing
    async fn patched(&self, id: &str, update: &ItemUpdate) -> Result<Item, ContentServiceError> {
        let mut item = self
            .store
            .get_item(id)
            .await?
            .ok_or_else(|| ContentServiceError::not_found(id))?;

        if let Some(title) = &update.title {
            item.title = title.clone();
        }
        if let Some(properties) = &update.properties {
            item.properties = properties.clone();
        }

        Ok(item)
    }

    async fn create(&self, mut item: Item) -> Result<Item, ContentServiceError> {
        self.sessions.require_admin().await?;

        // Append: new items always sort last
        let next_order = self.store.max_order(item.collection).await? + 1;
        item.display_order = next_order;

        tracing::debug!(
            "Creating {} item '{}' at display_order {}",
            item.collection,
            item.id,
            next_order
        );

        Ok(self.store.insert_item(item).await?)
    }
}

#[cfg(test)]
#[path = "content_test.rs"]
mod content_test;
