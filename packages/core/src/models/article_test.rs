//! Tests for ArticleRecord wrapper

use crate::models::{ArticleRecord, Collection, Item, ValidationError};
use serde_json::json;

fn valid_properties() -> serde_json::Value {
    json!({
        "summary": "What I learned shipping an embedded database",
        "content": "## Background\n\nLong-form body...",
        "image": "/img/embedded-db.png",
        "tags": ["databases", "rust"],
        "date": "January 2026",
    })
}

#[test]
fn test_builder_creates_valid_record() {
    let article = ArticleRecord::new(
        "Shipping an embedded database".to_string(),
        "What I learned".to_string(),
    )
    .content("## Background".to_string())
    .image("/img/embedded-db.png".to_string())
    .tags(vec!["databases".to_string()])
    .date("January 2026".to_string())
    .build();

    assert_eq!(article.as_item().collection, Collection::Articles);
    assert_eq!(article.summary(), "What I learned");

    let item = article.into_item();
    assert!(ArticleRecord::from_item(item).is_ok());
}

#[test]
fn test_from_item_rejects_wrong_collection() {
    let item = Item::new(
        Collection::Projects,
        "Not an article".to_string(),
        1,
        valid_properties(),
    );

    assert!(matches!(
        ArticleRecord::from_item(item),
        Err(ValidationError::WrongCollection { .. })
    ));
}

#[test]
fn test_from_item_rejects_missing_body() {
    let mut properties = valid_properties();
    properties.as_object_mut().unwrap().remove("content");

    let item = Item::new(Collection::Articles, "Broken row".to_string(), 1, properties);

    assert!(matches!(
        ArticleRecord::from_item(item),
        Err(ValidationError::MissingField(field)) if field == "content"
    ));
}

#[test]
fn test_from_item_rejects_null_summary() {
    let mut properties = valid_properties();
    properties["summary"] = json!(null);

    let item = Item::new(Collection::Articles, "Broken row".to_string(), 1, properties);

    assert!(matches!(
        ArticleRecord::from_item(item),
        Err(ValidationError::MissingField(field)) if field == "summary"
    ));
}
