//! SqliteStore - ContentStore Implementation over libsql
//!
//! Embedded SQLite-compatible storage for content items, mirroring the
//! hosted backend's schema: a universal `items` table with a
//! `display_order` integer column and a JSON `properties` column.
//!
//! # Database Connection Patterns
//!
//! Always use `connect_with_timeout()` in async functions. SQLite
//! connections have thread-affinity requirements, and the Tokio runtime
//! may move a future between threads at any `.await` point; the 5-second
//! busy timeout makes concurrent operations wait and retry instead of
//! failing immediately with `SQLITE_BUSY`.

use crate::db::{ContentStore, StoreError};
use crate::models::{Collection, Item, ItemUpdate};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use libsql::{Builder, Database};
use std::path::PathBuf;
use std::sync::Arc;

/// Columns selected for every Item read, in `row_to_item` order
const ITEM_COLUMNS: &str = "id, collection, title, display_order, created_at, updated_at, properties";

/// Content store backed by an embedded libsql database
#[derive(Debug, Clone)]
pub struct SqliteStore {
    /// libsql database handle (wrapped in Arc for sharing)
    db: Arc<Database>,

    /// Path to the database file
    db_path: PathBuf,
}

impl SqliteStore {
    /// Create a new SqliteStore with the specified database path
    ///
    /// This will:
    /// 1. Ensure the parent directory exists (create if needed)
    /// 2. Open/create the database file
    /// 3. Initialize the schema (CREATE TABLE IF NOT EXISTS)
    /// 4. Enable WAL mode and the busy timeout
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the parent directory cannot be created, the
    /// connection fails, or schema initialization fails.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use folio_core::db::SqliteStore;
    /// # use std::path::PathBuf;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let store = SqliteStore::new(PathBuf::from("./data/folio.db")).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn new(db_path: PathBuf) -> Result<Self, StoreError> {
        if let Some(parent) = db_path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(StoreError::DirectoryCreationFailed)?;
            }
        }

        let db = Builder::new_local(&db_path)
            .build()
            .await
            .map_err(|e| StoreError::connection_failed(db_path.clone(), e))?;

        let store = Self {
            db: Arc::new(db),
            db_path,
        };

        store.initialize_schema().await?;

        Ok(store)
    }

    /// Create an in-memory store (tests and previews)
    pub async fn new_in_memory() -> Result<Self, StoreError> {
        Self::new(PathBuf::from(":memory:")).await
    }

    /// Path this store was opened with
    pub fn db_path(&self) -> &PathBuf {
        &self.db_path
    }

    /// Execute a PRAGMA statement
    ///
    /// PRAGMA statements return rows, so query() must be used instead of
    /// execute().
    async fn execute_pragma(
        &self,
        conn: &libsql::Connection,
        pragma: &str,
    ) -> Result<(), StoreError> {
        let mut stmt = conn.prepare(pragma).await.map_err(|e| {
            StoreError::sql_execution(format!("Failed to execute '{}': {}", pragma, e))
        })?;
        let _ = stmt.query(()).await.map_err(|e| {
            StoreError::sql_execution(format!("Failed to execute '{}': {}", pragma, e))
        })?;
        Ok(())
    }

    /// Get an async connection with busy timeout configured
    ///
    /// The safe default for all async code paths; see the module docs.
    async fn connect_with_timeout(&self) -> Result<libsql::Connection, StoreError> {
        let conn = self.db.connect().map_err(StoreError::Libsql)?;

        self.execute_pragma(&conn, "PRAGMA busy_timeout = 5000")
            .await?;

        Ok(conn)
    }

    /// Initialize database schema and configuration
    ///
    /// Idempotent (CREATE TABLE IF NOT EXISTS); safe to call on every
    /// startup.
    async fn initialize_schema(&self) -> Result<(), StoreError> {
        let conn = self.connect_with_timeout().await?;

        // WAL mode for better concurrency between admin and public reads
        self.execute_pragma(&conn, "PRAGMA journal_mode = WAL")
            .await?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS items (
                id TEXT PRIMARY KEY,
                collection TEXT NOT NULL,
                title TEXT NOT NULL,
                display_order INTEGER NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                properties JSON NOT NULL DEFAULT '{}'
            )",
            (),
        )
        .await
        .map_err(|e| StoreError::sql_execution(format!("Failed to create items table: {}", e)))?;

        // The canonical view sorts on (collection, display_order)
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_items_collection_order
             ON items (collection, display_order)",
            (),
        )
        .await
        .map_err(|e| {
            StoreError::sql_execution(format!("Failed to create ordering index: {}", e))
        })?;

        Ok(())
    }

    /// Convert a database row to an Item
    ///
    /// Central conversion point for all query operations.
    fn row_to_item(row: &libsql::Row) -> Result<Item, StoreError> {
        let id: String = row
            .get(0)
            .map_err(|e| StoreError::row_decode(format!("Failed to get id: {}", e)))?;
        let collection_str: String = row
            .get(1)
            .map_err(|e| StoreError::row_decode(format!("Failed to get collection: {}", e)))?;
        let title: String = row
            .get(2)
            .map_err(|e| StoreError::row_decode(format!("Failed to get title: {}", e)))?;
        let display_order: i64 = row
            .get(3)
            .map_err(|e| StoreError::row_decode(format!("Failed to get display_order: {}", e)))?;
        let created_at_str: String = row
            .get(4)
            .map_err(|e| StoreError::row_decode(format!("Failed to get created_at: {}", e)))?;
        let updated_at_str: String = row
            .get(5)
            .map_err(|e| StoreError::row_decode(format!("Failed to get updated_at: {}", e)))?;
        let properties_json: String = row
            .get(6)
            .map_err(|e| StoreError::row_decode(format!("Failed to get properties: {}", e)))?;

        let collection = Collection::parse(&collection_str)
            .map_err(|e| StoreError::row_decode(e.to_string()))?;

        let created_at = parse_timestamp(&created_at_str, "created_at")?;
        let updated_at = parse_timestamp(&updated_at_str, "updated_at")?;

        let properties = serde_json::from_str(&properties_json)
            .map_err(|e| StoreError::row_decode(format!("Invalid properties JSON: {}", e)))?;

        Ok(Item {
            id,
            collection,
            title,
            display_order,
            created_at,
            updated_at,
            properties,
        })
    }
}

fn parse_timestamp(value: &str, column: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::row_decode(format!("Invalid {} timestamp: {}", column, e)))
}

#[async_trait]
impl ContentStore for SqliteStore {
    async fn list_ordered(&self, collection: Collection) -> Result<Vec<Item>, StoreError> {
        let conn = self.connect_with_timeout().await?;

        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM items WHERE collection = ?
                 ORDER BY display_order ASC, id ASC",
                ITEM_COLUMNS
            ))
            .await
            .map_err(|e| {
                StoreError::sql_execution(format!("Failed to prepare list query: {}", e))
            })?;

        let mut rows = stmt.query([collection.as_str()]).await.map_err(|e| {
            StoreError::sql_execution(format!("Failed to execute list query: {}", e))
        })?;

        let mut items = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| StoreError::sql_execution(format!("Failed to fetch row: {}", e)))?
        {
            items.push(Self::row_to_item(&row)?);
        }

        Ok(items)
    }

    async fn get_item(&self, id: &str) -> Result<Option<Item>, StoreError> {
        let conn = self.connect_with_timeout().await?;

        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM items WHERE id = ?",
                ITEM_COLUMNS
            ))
            .await
            .map_err(|e| {
                StoreError::sql_execution(format!("Failed to prepare get query: {}", e))
            })?;

        let mut rows = stmt
            .query([id])
            .await
            .map_err(|e| StoreError::sql_execution(format!("Failed to execute get query: {}", e)))?;

        match rows
            .next()
            .await
            .map_err(|e| StoreError::sql_execution(format!("Failed to fetch row: {}", e)))?
        {
            Some(row) => Ok(Some(Self::row_to_item(&row)?)),
            None => Ok(None),
        }
    }

    async fn insert_item(&self, item: Item) -> Result<Item, StoreError> {
        let conn = self.connect_with_timeout().await?;

        let properties = serde_json::to_string(&item.properties)
            .map_err(|e| StoreError::sql_execution(format!("Failed to encode properties: {}", e)))?;

        conn.execute(
            "INSERT INTO items (id, collection, title, display_order, created_at, updated_at, properties)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            (
                item.id.as_str(),
                item.collection.as_str(),
                item.title.as_str(),
                item.display_order,
                item.created_at.to_rfc3339(),
                item.updated_at.to_rfc3339(),
                properties,
            ),
        )
        .await
        .map_err(|e| StoreError::sql_execution(format!("Failed to insert item: {}", e)))?;

        Ok(item)
    }

    async fn update_item(&self, id: &str, update: ItemUpdate) -> Result<Item, StoreError> {
        let mut item = self
            .get_item(id)
            .await?
            .ok_or_else(|| StoreError::row_missing(id))?;

        if let Some(title) = update.title {
            item.title = title;
        }
        if let Some(properties) = update.properties {
            item.properties = properties;
        }
        item.updated_at = Utc::now();

        let properties = serde_json::to_string(&item.properties)
            .map_err(|e| StoreError::sql_execution(format!("Failed to encode properties: {}", e)))?;

        let conn = self.connect_with_timeout().await?;
        conn.execute(
            "UPDATE items SET title = ?, properties = ?, updated_at = ? WHERE id = ?",
            (
                item.title.as_str(),
                properties,
                item.updated_at.to_rfc3339(),
                id,
            ),
        )
        .await
        .map_err(|e| StoreError::sql_execution(format!("Failed to update item: {}", e)))?;

        Ok(item)
    }

    async fn update_order(
        &self,
        collection: Collection,
        id: &str,
        new_order: i64,
    ) -> Result<(), StoreError> {
        let conn = self.connect_with_timeout().await?;

        // Exactly the display_order column of exactly one row. updated_at
        // is deliberately untouched: a position change is not a content
        // edit.
        let rows_affected = conn
            .execute(
                "UPDATE items SET display_order = ? WHERE id = ? AND collection = ?",
                (new_order, id, collection.as_str()),
            )
            .await
            .map_err(|e| StoreError::sql_execution(format!("Failed to update order: {}", e)))?;

        if rows_affected == 0 {
            return Err(StoreError::row_missing(id));
        }

        Ok(())
    }

    async fn max_order(&self, collection: Collection) -> Result<i64, StoreError> {
        let conn = self.connect_with_timeout().await?;

        let mut stmt = conn
            .prepare("SELECT COALESCE(MAX(display_order), 0) FROM items WHERE collection = ?")
            .await
            .map_err(|e| {
                StoreError::sql_execution(format!("Failed to prepare max_order query: {}", e))
            })?;

        let mut rows = stmt.query([collection.as_str()]).await.map_err(|e| {
            StoreError::sql_execution(format!("Failed to execute max_order query: {}", e))
        })?;

        let row = rows
            .next()
            .await
            .map_err(|e| StoreError::sql_execution(format!("Failed to fetch row: {}", e)))?
            .ok_or_else(|| StoreError::sql_execution("max_order query returned no row"))?;

        row.get(0)
            .map_err(|e| StoreError::row_decode(format!("Failed to get max order: {}", e)))
    }

    async fn delete_item(&self, id: &str) -> Result<bool, StoreError> {
        let conn = self.connect_with_timeout().await?;

        let rows_affected = conn
            .execute("DELETE FROM items WHERE id = ?", [id])
            .await
            .map_err(|e| StoreError::sql_execution(format!("Failed to delete item: {}", e)))?;

        Ok(rows_affected > 0)
    }
}
