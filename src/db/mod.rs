// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer.
//!
//! Repositories talk to a [`DocumentStore`]: Firestore in production, an
//! in-memory map for local runs and tests. Documents travel as JSON maps;
//! a document's key is never stored inside it.

pub mod firestore;
pub mod memory;
pub mod repository;

pub use firestore::FirestoreDb;
pub use memory::MemoryDb;
pub use repository::{KeyStrategy, OwnedRecord, Record, Repository};

use crate::error::AppError;
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const FARMS: &str = "farms";
    /// Crop profiles (keyed by farm id)
    pub const CROPS: &str = "crops";
    /// Farm resource profiles (keyed by farm id)
    pub const RESOURCES: &str = "resources";
    /// Farm challenge profiles (keyed by farm id)
    pub const CHALLENGES: &str = "challenges";
    /// User resource profiles (keyed by user id)
    pub const USER_RESOURCES: &str = "userResources";
    /// User challenge profiles (keyed by user id)
    pub const USER_CHALLENGES: &str = "userChallenges";
    pub const SOIL_PROFILES: &str = "soilProfiles";
    pub const LOGS: &str = "logs";
    pub const CHATS: &str = "chats";
    pub const ALERTS: &str = "alerts";
    pub const FINANCE: &str = "finance";
}

/// Field map of a stored document.
pub type Document = serde_json::Map<String, Value>;

/// A document together with its key.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: String,
    pub fields: Document,
}

/// Equality filter on a single string field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFilter {
    pub field: &'static str,
    pub value: String,
}

impl FieldFilter {
    pub fn eq(field: &'static str, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Ordering applied to a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy {
    pub field: &'static str,
    pub direction: SortDirection,
}

impl OrderBy {
    pub const fn asc(field: &'static str) -> Self {
        Self {
            field,
            direction: SortDirection::Ascending,
        }
    }

    pub const fn desc(field: &'static str) -> Self {
        Self {
            field,
            direction: SortDirection::Descending,
        }
    }
}

/// Document store primitives used by the repositories.
///
/// Implementations guarantee per-document atomicity only. Nothing here
/// spans documents.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read one document. `Ok(None)` if it does not exist.
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, AppError>;

    /// Insert a document under a freshly generated key and return the key.
    async fn add(&self, collection: &str, fields: &Document) -> Result<String, AppError>;

    /// Create or fully overwrite the document at `id`.
    async fn set(&self, collection: &str, id: &str, fields: &Document) -> Result<(), AppError>;

    /// Overwrite only the given top-level fields of an existing document.
    /// Fails with `NotFound` rather than creating a missing one.
    async fn update(&self, collection: &str, id: &str, fields: &Document)
        -> Result<(), AppError>;

    async fn delete(&self, collection: &str, id: &str) -> Result<(), AppError>;

    /// Scan a collection, optionally filtered by one field and ordered.
    /// Without an ordering, documents come back in key order.
    async fn query(
        &self,
        collection: &str,
        filter: Option<FieldFilter>,
        order: Option<OrderBy>,
        limit: Option<u32>,
    ) -> Result<Vec<StoredDocument>, AppError>;
}

/// Generate a document key in the style of Firestore auto-ids.
pub fn new_document_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Serialize a value into a document field map.
pub fn to_document<T: Serialize>(value: &T) -> Result<Document, AppError> {
    match serde_json::to_value(value)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Serialization failed: {}", e)))?
    {
        Value::Object(map) => Ok(map),
        other => Err(AppError::Internal(anyhow::anyhow!(
            "Expected an object, got {}",
            other
        ))),
    }
}

/// Deserialize a stored document, injecting its key as `id`.
pub fn from_document<T: DeserializeOwned>(id: &str, mut fields: Document) -> Result<T, AppError> {
    fields.insert("id".to_string(), Value::String(id.to_string()));
    serde_json::from_value(Value::Object(fields))
        .map_err(|e| AppError::Database(format!("Malformed document {}: {}", id, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Serialize, Deserialize)]
    struct Sample {
        id: String,
        name: String,
    }

    #[test]
    fn test_from_document_injects_key() {
        let fields = to_document(&json!({ "name": "north plot" })).unwrap();
        let sample: Sample = from_document("abc", fields).unwrap();
        assert_eq!(sample.id, "abc");
        assert_eq!(sample.name, "north plot");
    }

    #[test]
    fn test_from_document_key_wins_over_stored_id() {
        let fields = to_document(&json!({ "id": "stale", "name": "x" })).unwrap();
        let sample: Sample = from_document("fresh", fields).unwrap();
        assert_eq!(sample.id, "fresh");
    }

    #[test]
    fn test_to_document_rejects_scalars() {
        assert!(to_document(&42).is_err());
    }

    #[test]
    fn test_from_document_malformed_is_database_error() {
        let fields = to_document(&json!({ "name": 7 })).unwrap();
        let err = from_document::<Sample>("abc", fields).unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
    }

    #[test]
    fn test_new_document_ids_are_unique() {
        assert_ne!(new_document_id(), new_document_id());
    }
}
