// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory [`DocumentStore`] for local runs and tests.
//!
//! Mirrors the Firestore semantics the repositories rely on: key-ordered
//! scans, equality filters, single-field ordering, and field-level merges on
//! update.

use crate::db::{
    new_document_id, Document, DocumentStore, FieldFilter, OrderBy, SortDirection, StoredDocument,
};
use crate::error::AppError;
use async_trait::async_trait;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

type Collection = BTreeMap<String, Document>;

#[derive(Clone, Default)]
pub struct MemoryDb {
    collections: Arc<RwLock<HashMap<String, Collection>>>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently stored in `collection`.
    pub async fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, BTreeMap::len)
    }
}

/// Order two field values the way Firestore orders same-typed values.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
        (Some(Value::Number(a)), Some(Value::Number(b))) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::Bool(a)), Some(Value::Bool(b))) => a.cmp(b),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

#[async_trait]
impl DocumentStore for MemoryDb {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, AppError> {
        Ok(self
            .collections
            .read()
            .await
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned())
    }

    async fn add(&self, collection: &str, fields: &Document) -> Result<String, AppError> {
        let id = new_document_id();
        self.set(collection, &id, fields).await?;
        Ok(id)
    }

    async fn set(&self, collection: &str, id: &str, fields: &Document) -> Result<(), AppError> {
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), fields.clone());
        Ok(())
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        fields: &Document,
    ) -> Result<(), AppError> {
        let mut guard = self.collections.write().await;
        let doc = guard
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| {
                AppError::NotFound(format!("No document {} in {} to update", id, collection))
            })?;

        for (key, value) in fields {
            doc.insert(key.clone(), value.clone());
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), AppError> {
        if let Some(docs) = self.collections.write().await.get_mut(collection) {
            docs.remove(id);
        }
        Ok(())
    }

    async fn query(
        &self,
        collection: &str,
        filter: Option<FieldFilter>,
        order: Option<OrderBy>,
        limit: Option<u32>,
    ) -> Result<Vec<StoredDocument>, AppError> {
        let guard = self.collections.read().await;
        let Some(docs) = guard.get(collection) else {
            return Ok(Vec::new());
        };

        let mut matches: Vec<StoredDocument> = docs
            .iter()
            .filter(|(_, fields)| match &filter {
                Some(f) => fields.get(f.field).and_then(Value::as_str) == Some(f.value.as_str()),
                None => true,
            })
            .map(|(id, fields)| StoredDocument {
                id: id.clone(),
                fields: fields.clone(),
            })
            .collect();

        if let Some(order) = order {
            // Stable sort keeps key order among equal values
            matches.sort_by(|a, b| {
                let ord = compare_values(a.fields.get(order.field), b.fields.get(order.field));
                match order.direction {
                    SortDirection::Ascending => ord,
                    SortDirection::Descending => ord.reverse(),
                }
            });
        }

        if let Some(limit) = limit {
            matches.truncate(limit as usize);
        }

        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::to_document;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        to_document(&value).unwrap()
    }

    #[tokio::test]
    async fn test_set_overwrites_whole_document() {
        let db = MemoryDb::new();
        db.set("crops", "f1", &doc(json!({ "a": 1, "b": 2 })))
            .await
            .unwrap();
        db.set("crops", "f1", &doc(json!({ "a": 3 }))).await.unwrap();

        let stored = db.get("crops", "f1").await.unwrap().unwrap();
        assert_eq!(stored, doc(json!({ "a": 3 })));
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let db = MemoryDb::new();
        db.set("farms", "f1", &doc(json!({ "village": "A", "state": "KL" })))
            .await
            .unwrap();
        db.update("farms", "f1", &doc(json!({ "village": null })))
            .await
            .unwrap();

        let stored = db.get("farms", "f1").await.unwrap().unwrap();
        assert_eq!(stored, doc(json!({ "village": null, "state": "KL" })));
    }

    #[tokio::test]
    async fn test_update_missing_document_fails() {
        let db = MemoryDb::new();
        let result = db.update("farms", "nope", &doc(json!({ "x": 1 }))).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert!(db.get("farms", "nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_query_filters_and_orders() {
        let db = MemoryDb::new();
        for (id, farm, ts) in [
            ("a", "f1", "2025-01-02T00:00:00.000000Z"),
            ("b", "f2", "2025-01-03T00:00:00.000000Z"),
            ("c", "f1", "2025-01-01T00:00:00.000000Z"),
            ("d", "f1", "2025-01-03T00:00:00.000000Z"),
        ] {
            db.set("logs", id, &doc(json!({ "farmId": farm, "timestamp": ts })))
                .await
                .unwrap();
        }

        let desc = db
            .query(
                "logs",
                Some(FieldFilter::eq("farmId", "f1")),
                Some(OrderBy::desc("timestamp")),
                None,
            )
            .await
            .unwrap();
        let ids: Vec<_> = desc.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["d", "a", "c"]);

        let asc = db
            .query(
                "logs",
                Some(FieldFilter::eq("farmId", "f1")),
                Some(OrderBy::asc("timestamp")),
                Some(2),
            )
            .await
            .unwrap();
        let ids: Vec<_> = asc.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["c", "a"]);
    }

    #[tokio::test]
    async fn test_query_unknown_collection_is_empty() {
        let db = MemoryDb::new();
        assert!(db.query("nothing", None, None, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_and_count() {
        let db = MemoryDb::new();
        let id = db.add("farms", &doc(json!({ "userId": "u1" }))).await.unwrap();
        assert_eq!(db.count("farms").await, 1);

        db.delete("farms", &id).await.unwrap();
        assert_eq!(db.count("farms").await, 0);
        assert!(db.get("farms", &id).await.unwrap().is_none());
    }
}
