//! Tests for the swap-based reorder protocol

use crate::db::{ContentStore, SqliteStore, StoreError};
use crate::models::{Collection, Item, ItemUpdate};
use crate::services::{ContentServiceError, Direction, ReorderService};
use async_trait::async_trait;
use serde_json::json;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

fn item(id: &str, order: i64) -> Item {
    Item::new_with_id(
        id.to_string(),
        Collection::Projects,
        format!("Project {}", id),
        order,
        json!({ "tags": [] }),
    )
}

/// Store with a seeded snapshot; returns the snapshot in ascending order
async fn seeded_store(rows: &[(&str, i64)]) -> (Arc<SqliteStore>, Vec<Item>, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let store = Arc::new(
        SqliteStore::new(temp_dir.path().join("reorder-test.db"))
            .await
            .unwrap(),
    );

    for (id, order) in rows {
        store.insert_item(item(id, *order)).await.unwrap();
    }

    let snapshot = store.list_ordered(Collection::Projects).await.unwrap();
    (store, snapshot, temp_dir)
}

fn ids(items: &[Item]) -> Vec<&str> {
    items.iter().map(|i| i.id.as_str()).collect()
}

fn order_of(items: &[Item], id: &str) -> i64 {
    items.iter().find(|i| i.id == id).unwrap().display_order
}

/// Wrapper that fails `update_order` for configured row ids
struct FailingStore {
    inner: Arc<SqliteStore>,
    fail_order_writes_for: HashSet<String>,
}

impl FailingStore {
    fn new(inner: Arc<SqliteStore>, fail_ids: &[&str]) -> Self {
        Self {
            inner,
            fail_order_writes_for: fail_ids.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[async_trait]
impl ContentStore for FailingStore {
    async fn list_ordered(&self, collection: Collection) -> Result<Vec<Item>, StoreError> {
        self.inner.list_ordered(collection).await
    }

    async fn get_item(&self, id: &str) -> Result<Option<Item>, StoreError> {
        self.inner.get_item(id).await
    }

    async fn insert_item(&self, item: Item) -> Result<Item, StoreError> {
        self.inner.insert_item(item).await
    }

    async fn update_item(&self, id: &str, update: ItemUpdate) -> Result<Item, StoreError> {
        self.inner.update_item(id, update).await
    }

    async fn update_order(
        &self,
        collection: Collection,
        id: &str,
        new_order: i64,
    ) -> Result<(), StoreError> {
        if self.fail_order_writes_for.contains(id) {
            return Err(StoreError::sql_execution(format!(
                "injected write failure for {}",
                id
            )));
        }
        self.inner.update_order(collection, id, new_order).await
    }

    async fn max_order(&self, collection: Collection) -> Result<i64, StoreError> {
        self.inner.max_order(collection).await
    }

    async fn delete_item(&self, id: &str) -> Result<bool, StoreError> {
        self.inner.delete_item(id).await
    }
}

/// Wrapper counting `update_order` calls
struct CountingStore {
    inner: Arc<SqliteStore>,
    order_writes: AtomicUsize,
}

impl CountingStore {
    fn new(inner: Arc<SqliteStore>) -> Self {
        Self {
            inner,
            order_writes: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ContentStore for CountingStore {
    async fn list_ordered(&self, collection: Collection) -> Result<Vec<Item>, StoreError> {
        self.inner.list_ordered(collection).await
    }

    async fn get_item(&self, id: &str) -> Result<Option<Item>, StoreError> {
        self.inner.get_item(id).await
    }

    async fn insert_item(&self, item: Item) -> Result<Item, StoreError> {
        self.inner.insert_item(item).await
    }

    async fn update_item(&self, id: &str, update: ItemUpdate) -> Result<Item, StoreError> {
        self.inner.update_item(id, update).await
    }

    async fn update_order(
        &self,
        collection: Collection,
        id: &str,
        new_order: i64,
    ) -> Result<(), StoreError> {
        self.order_writes.fetch_add(1, Ordering::SeqCst);
        self.inner.update_order(collection, id, new_order).await
    }

    async fn max_order(&self, collection: Collection) -> Result<i64, StoreError> {
        self.inner.max_order(collection).await
    }

    async fn delete_item(&self, id: &str) -> Result<bool, StoreError> {
        self.inner.delete_item(id).await
    }
}

#[tokio::test]
async fn test_move_up_swaps_with_previous_item() {
    let (store, snapshot, _temp_dir) = seeded_store(&[("a", 1), ("b", 2), ("c", 3)]).await;
    let service = ReorderService::new(store.clone());

    let updated = service
        .reorder(Collection::Projects, &snapshot, "b", Direction::Up)
        .await
        .unwrap();

    assert_eq!(ids(&updated), vec!["b", "a", "c"]);
    assert_eq!(order_of(&updated, "a"), 2);
    assert_eq!(order_of(&updated, "b"), 1);
    assert_eq!(order_of(&updated, "c"), 3);

    // The store must agree with the returned sequence
    let persisted = store.list_ordered(Collection::Projects).await.unwrap();
    assert_eq!(ids(&persisted), vec!["b", "a", "c"]);
}

#[tokio::test]
async fn test_move_down_swaps_with_next_item() {
    let (store, snapshot, _temp_dir) = seeded_store(&[("a", 1), ("b", 2), ("c", 3)]).await;
    let service = ReorderService::new(store);

    let updated = service
        .reorder(Collection::Projects, &snapshot, "a", Direction::Down)
        .await
        .unwrap();

    assert_eq!(ids(&updated), vec!["b", "a", "c"]);
    assert_eq!(order_of(&updated, "a"), 2);
    assert_eq!(order_of(&updated, "b"), 1);
}

#[tokio::test]
async fn test_move_up_on_first_item_is_noop() {
    let (store, snapshot, _temp_dir) = seeded_store(&[("a", 1), ("b", 2)]).await;
    let service = ReorderService::new(store);

    let updated = service
        .reorder(Collection::Projects, &snapshot, "a", Direction::Up)
        .await
        .unwrap();

    assert_eq!(updated, snapshot);
}

#[tokio::test]
async fn test_move_down_on_last_item_is_noop() {
    let (store, snapshot, _temp_dir) = seeded_store(&[("a", 1), ("b", 2)]).await;
    let service = ReorderService::new(store);

    let updated = service
        .reorder(Collection::Projects, &snapshot, "b", Direction::Down)
        .await
        .unwrap();

    assert_eq!(updated, snapshot);
}

#[tokio::test]
async fn test_up_then_down_restores_original_order() {
    let (store, snapshot, _temp_dir) =
        seeded_store(&[("a", 1), ("b", 2), ("c", 3), ("d", 4)]).await;
    let service = ReorderService::new(store);

    let after_up = service
        .reorder(Collection::Projects, &snapshot, "c", Direction::Up)
        .await
        .unwrap();
    assert_eq!(ids(&after_up), vec!["a", "c", "b", "d"]);

    let after_down = service
        .reorder(Collection::Projects, &after_up, "c", Direction::Down)
        .await
        .unwrap();

    assert_eq!(after_down, snapshot);
}

#[tokio::test]
async fn test_repeated_down_moves_one_position_each() {
    let (store, snapshot, _temp_dir) = seeded_store(&[("a", 1), ("b", 2), ("c", 3)]).await;
    let service = ReorderService::new(store);

    let first = service
        .reorder(Collection::Projects, &snapshot, "a", Direction::Down)
        .await
        .unwrap();
    assert_eq!(ids(&first), vec!["b", "a", "c"]);

    let second = service
        .reorder(Collection::Projects, &first, "a", Direction::Down)
        .await
        .unwrap();
    assert_eq!(ids(&second), vec!["b", "c", "a"]);

    // Already last: a further move is a no-op, never a skip
    let third = service
        .reorder(Collection::Projects, &second, "a", Direction::Down)
        .await
        .unwrap();
    assert_eq!(third, second);
}

#[tokio::test]
async fn test_unknown_item_fails_without_writes() {
    let (store, snapshot, _temp_dir) = seeded_store(&[("a", 1), ("b", 2)]).await;
    let counting = Arc::new(CountingStore::new(store));
    let service = ReorderService::new(counting.clone());

    let result = service
        .reorder(Collection::Projects, &snapshot, "ghost", Direction::Up)
        .await;

    assert!(matches!(
        result,
        Err(ContentServiceError::NotFound { id }) if id == "ghost"
    ));
    assert_eq!(counting.order_writes.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_neighbor_write_failure_reports_partial_reorder() {
    let (store, snapshot, _temp_dir) = seeded_store(&[("a", 1), ("b", 2), ("c", 3)]).await;
    let failing = Arc::new(FailingStore::new(store.clone(), &["a"]));
    let service = ReorderService::new(failing);

    // Moving b up targets neighbor a, whose write is failed
    let result = service
        .reorder(Collection::Projects, &snapshot, "b", Direction::Up)
        .await;

    match result {
        Err(ContentServiceError::PartialReorderFailure {
            written_id,
            failed_id,
            ..
        }) => {
            assert_eq!(written_id, "b");
            assert_eq!(failed_id, "a");
        }
        other => panic!(
            "Expected PartialReorderFailure, got {:?}",
            other.map(|v| ids(&v).join(","))
        ),
    }

    // The succeeded half really is in the store: b now carries a's old order
    let persisted = store.get_item("b").await.unwrap().unwrap();
    assert_eq!(persisted.display_order, 1);
    let untouched = store.get_item("a").await.unwrap().unwrap();
    assert_eq!(untouched.display_order, 1);
}

#[tokio::test]
async fn test_item_write_failure_reports_partial_reorder() {
    let (store, snapshot, _temp_dir) = seeded_store(&[("a", 1), ("b", 2)]).await;
    let failing = Arc::new(FailingStore::new(store, &["b"]));
    let service = ReorderService::new(failing);

    let result = service
        .reorder(Collection::Projects, &snapshot, "b", Direction::Up)
        .await;

    assert!(matches!(
        result,
        Err(ContentServiceError::PartialReorderFailure { written_id, failed_id, .. })
            if written_id == "a" && failed_id == "b"
    ));
}

#[tokio::test]
async fn test_both_writes_failing_reports_store_unavailable() {
    let (store, snapshot, _temp_dir) = seeded_store(&[("a", 1), ("b", 2)]).await;
    let failing = Arc::new(FailingStore::new(store.clone(), &["a", "b"]));
    let service = ReorderService::new(failing);

    let result = service
        .reorder(Collection::Projects, &snapshot, "b", Direction::Up)
        .await;

    assert!(matches!(
        result,
        Err(ContentServiceError::StoreUnavailable(_))
    ));

    // Nothing was modified; retrying from a fresh snapshot is safe
    assert_eq!(store.get_item("a").await.unwrap().unwrap().display_order, 1);
    assert_eq!(store.get_item("b").await.unwrap().unwrap().display_order, 2);
}

#[tokio::test]
async fn test_equal_display_orders_are_rejected() {
    let (store, _, _temp_dir) = seeded_store(&[]).await;
    let service = ReorderService::new(store);

    // A snapshot with a transient collision, as another racing session
    // could produce; the swap cannot change the derived order
    let snapshot = vec![item("a", 1), item("b", 1)];

    let result = service
        .reorder(Collection::Projects, &snapshot, "b", Direction::Up)
        .await;

    assert!(matches!(
        result,
        Err(ContentServiceError::OrderCollision { display_order: 1, .. })
    ));
}

#[tokio::test]
async fn test_swap_preserves_sparse_orders() {
    // Gaps from deletions must survive the swap untouched
    let (store, snapshot, _temp_dir) = seeded_store(&[("a", 2), ("b", 7), ("c", 40)]).await;
    let service = ReorderService::new(store);

    let updated = service
        .reorder(Collection::Projects, &snapshot, "c", Direction::Up)
        .await
        .unwrap();

    assert_eq!(ids(&updated), vec!["a", "c", "b"]);
    assert_eq!(order_of(&updated, "c"), 7);
    assert_eq!(order_of(&updated, "b"), 40);
    assert_eq!(order_of(&updated, "a"), 2);
}
