// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Generic entity repository over a [`DocumentStore`].
//!
//! Each entity type describes its collection, key strategy and stamped
//! timestamps through [`Record`] / [`OwnedRecord`]; the CRUD rules live here
//! once:
//! - `create` rejects a body whose owner field disagrees with the path.
//! - Singleton profiles are written with replace semantics at the owner key.
//! - `update` requires an existing document and writes only the fields the
//!   caller sent (plus the entity's touch timestamp, if any).
//! - `delete` removes one document. Children are not cascaded.

use crate::db::{
    from_document, to_document, DocumentStore, FieldFilter, OrderBy, StoredDocument,
};
use crate::error::{AppError, Result};
use crate::time_utils::now_rfc3339;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;

/// How a new document's key is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStrategy {
    /// Store-generated key; many documents per owner.
    Generated,
    /// The owner's key is reused; at most one document per owner.
    Owner,
}

/// A stored entity type.
pub trait Record: DeserializeOwned + Send + 'static {
    const COLLECTION: &'static str;
    /// Human-readable name used in error messages.
    const NAME: &'static str;
    /// Timestamp field re-stamped on every update.
    const TOUCHED_AT: Option<&'static str> = None;

    /// Partial update body. Fields left out of the serialized form are left
    /// untouched in the store.
    type Patch: Serialize + Send + Sync;
}

/// A stored entity that belongs to a User or a Farm.
pub trait OwnedRecord: Record {
    /// Foreign-key field naming the owner.
    const OWNER_FIELD: &'static str;
    const KEY: KeyStrategy;
    /// Timestamp field stamped when the document is created or replaced.
    const CREATED_AT: Option<&'static str>;
    /// Ordering for owner listings. `None` keeps the store's key order.
    const LIST_ORDER: Option<OrderBy> = None;

    type Create: Serialize + Send + Sync;

    /// Owner key carried in a create body.
    fn owner_of(create: &Self::Create) -> &str;
}

/// Typed access to one collection.
pub struct Repository<R> {
    store: Arc<dyn DocumentStore>,
    _record: PhantomData<fn() -> R>,
}

impl<R> Clone for Repository<R> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _record: PhantomData,
        }
    }
}

impl<R: Record> Repository<R> {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            _record: PhantomData,
        }
    }

    fn not_found() -> AppError {
        AppError::NotFound(format!("{} not found", R::NAME))
    }

    /// Get a document by key, `None` if absent.
    pub async fn find(&self, id: &str) -> Result<Option<R>> {
        self.store
            .get(R::COLLECTION, id)
            .await?
            .map(|fields| from_document(id, fields))
            .transpose()
    }

    /// Get a document by key.
    pub async fn get(&self, id: &str) -> Result<R> {
        self.find(id).await?.ok_or_else(Self::not_found)
    }

    /// Every document in the collection, in key order.
    pub async fn list_all(&self) -> Result<Vec<R>> {
        let docs = self.store.query(R::COLLECTION, None, None, None).await?;
        decode_all(docs)
    }

    /// Documents whose `field` equals `value`.
    pub async fn find_by_field(
        &self,
        field: &'static str,
        value: &str,
        order: Option<OrderBy>,
        limit: Option<u32>,
    ) -> Result<Vec<R>> {
        let docs = self
            .store
            .query(
                R::COLLECTION,
                Some(FieldFilter::eq(field, value)),
                order,
                limit,
            )
            .await?;
        decode_all(docs)
    }

    /// Apply a partial update and return the stored result.
    pub async fn update(&self, id: &str, patch: &R::Patch) -> Result<R> {
        if self.store.get(R::COLLECTION, id).await?.is_none() {
            return Err(Self::not_found());
        }

        let mut fields = to_document(patch)?;
        if let Some(field) = R::TOUCHED_AT {
            fields.insert(field.to_string(), Value::String(now_rfc3339()));
        }

        if fields.is_empty() {
            tracing::debug!(collection = R::COLLECTION, id, "Empty patch, nothing to write");
        } else {
            self.store.update(R::COLLECTION, id, &fields).await?;
            tracing::debug!(
                collection = R::COLLECTION,
                id,
                fields = fields.len(),
                "Document updated"
            );
        }

        self.get(id).await
    }

    /// Delete a document. Documents referencing it are left in place.
    pub async fn delete(&self, id: &str) -> Result<()> {
        if self.store.get(R::COLLECTION, id).await?.is_none() {
            return Err(Self::not_found());
        }
        self.store.delete(R::COLLECTION, id).await?;
        tracing::info!(collection = R::COLLECTION, id, "Document deleted");
        Ok(())
    }
}

impl<R: OwnedRecord> Repository<R> {
    /// Create a document for `owner_id`.
    ///
    /// Generated-key records get a fresh document; singleton profiles replace
    /// whatever was stored under the owner key.
    pub async fn create(&self, owner_id: &str, create: &R::Create) -> Result<R> {
        let body_owner = R::owner_of(create);
        if body_owner != owner_id {
            tracing::debug!(
                collection = R::COLLECTION,
                path_owner = owner_id,
                body_owner,
                "Owner mismatch on create"
            );
            return Err(AppError::BadRequest(format!(
                "{} in path and body do not match.",
                R::OWNER_FIELD
            )));
        }

        let mut fields = to_document(create)?;
        if let Some(field) = R::CREATED_AT {
            fields.insert(field.to_string(), Value::String(now_rfc3339()));
        }

        let id = match R::KEY {
            KeyStrategy::Generated => self.store.add(R::COLLECTION, &fields).await?,
            KeyStrategy::Owner => {
                self.store.set(R::COLLECTION, owner_id, &fields).await?;
                owner_id.to_string()
            }
        };

        tracing::debug!(collection = R::COLLECTION, id = %id, owner = owner_id, "Document created");

        // Read back so the response reflects exactly what was stored
        self.get(&id).await
    }

    /// All records belonging to `owner_id`, in the entity's listing order.
    pub async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<R>> {
        self.find_by_field(R::OWNER_FIELD, owner_id, R::LIST_ORDER, None)
            .await
    }
}

fn decode_all<R: DeserializeOwned>(docs: Vec<StoredDocument>) -> Result<Vec<R>> {
    docs.into_iter()
        .map(|doc| from_document(&doc.id, doc.fields))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryDb;
    use crate::models::{
        ActivityLog, CropAttributes, CropProfile, Farm, FarmAttributes, FarmUpdate, LogAttributes,
        User,
    };
    use serde_json::json;
    use std::time::Duration;

    fn store() -> Arc<dyn DocumentStore> {
        Arc::new(MemoryDb::new())
    }

    fn farm_attrs(user_id: &str) -> FarmAttributes {
        serde_json::from_value(json!({
            "userId": user_id,
            "village": "Kuttanad",
            "district": "Alappuzha",
            "totalFarmArea": 2.5,
        }))
        .unwrap()
    }

    fn log_attrs(farm_id: &str, activity: &str) -> LogAttributes {
        LogAttributes {
            farm_id: farm_id.to_string(),
            activity_type: activity.to_string(),
            description: format!("{} done", activity),
            geo_location: None,
        }
    }

    #[tokio::test]
    async fn test_create_rejects_owner_mismatch() {
        let farms = Repository::<Farm>::new(store());
        let err = farms.create("u1", &farm_attrs("u2")).await.unwrap_err();
        match err {
            AppError::BadRequest(msg) => assert!(msg.contains("userId")),
            other => panic!("expected bad request, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_then_get_round_trips() {
        let farms = Repository::<Farm>::new(store());
        let created = farms.create("u1", &farm_attrs("u1")).await.unwrap();
        assert_eq!(created.attributes.user_id, "u1");
        assert_eq!(created.attributes.land_status.as_deref(), Some("Owned"));

        let fetched = farms.get(&created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_missing_key() {
        let users = Repository::<User>::new(store());
        assert!(users.find("nobody").await.unwrap().is_none());
        assert!(matches!(
            users.get("nobody").await.unwrap_err(),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            users.delete("nobody").await.unwrap_err(),
            AppError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_update_only_writes_sent_fields() {
        let farms = Repository::<Farm>::new(store());
        let created = farms.create("u1", &farm_attrs("u1")).await.unwrap();

        let patch: FarmUpdate =
            serde_json::from_value(json!({ "village": null, "soilType": "Laterite" })).unwrap();
        let updated = farms.update(&created.id, &patch).await.unwrap();

        assert_eq!(updated.attributes.village, None);
        assert_eq!(updated.attributes.soil_type.as_deref(), Some("Laterite"));
        assert_eq!(updated.attributes.district.as_deref(), Some("Alappuzha"));
        assert_eq!(updated.attributes.total_farm_area, Some(2.5));
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let farms = Repository::<Farm>::new(store());
        let err = farms
            .update("missing", &FarmUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_empty_update_touches_farm_timestamp_only() {
        let farms = Repository::<Farm>::new(store());
        let created = farms.create("u1", &farm_attrs("u1")).await.unwrap();

        tokio::time::sleep(Duration::from_millis(5)).await;
        let updated = farms
            .update(&created.id, &FarmUpdate::default())
            .await
            .unwrap();

        assert!(updated.last_updated > created.last_updated);
        assert_eq!(updated.attributes, created.attributes);
    }

    #[tokio::test]
    async fn test_empty_update_without_touch_field_is_noop() {
        let logs = Repository::<ActivityLog>::new(store());
        let created = logs.create("f1", &log_attrs("f1", "sowing")).await.unwrap();
        let updated = logs
            .update(&created.id, &Default::default())
            .await
            .unwrap();
        assert_eq!(updated, created);
    }

    #[tokio::test]
    async fn test_singleton_create_replaces() {
        let crops = Repository::<CropProfile>::new(store());
        let first: CropAttributes = serde_json::from_value(json!({
            "farmId": "f1",
            "currentCrop": "Paddy",
            "season": "Mundakan",
        }))
        .unwrap();
        let second: CropAttributes = serde_json::from_value(json!({
            "farmId": "f1",
            "currentCrop": "Banana",
        }))
        .unwrap();

        let a = crops.create("f1", &first).await.unwrap();
        let b = crops.create("f1", &second).await.unwrap();

        assert_eq!(a.id, "f1");
        assert_eq!(b.id, "f1");
        assert_eq!(b.attributes.current_crop.as_deref(), Some("Banana"));
        // replace, not merge
        assert_eq!(b.attributes.season, None);
        assert_eq!(crops.list_by_owner("f1").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_logs_list_newest_first() {
        let logs = Repository::<ActivityLog>::new(store());
        for activity in ["ploughing", "sowing", "weeding"] {
            logs.create("f1", &log_attrs("f1", activity)).await.unwrap();
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
        logs.create("f2", &log_attrs("f2", "harvest")).await.unwrap();

        let listed: Vec<String> = logs
            .list_by_owner("f1")
            .await
            .unwrap()
            .into_iter()
            .map(|log| log.attributes.activity_type)
            .collect();
        assert_eq!(listed, vec!["weeding", "sowing", "ploughing"]);
    }

    #[tokio::test]
    async fn test_delete_leaves_children() {
        let store = store();
        let farms = Repository::<Farm>::new(store.clone());
        let logs = Repository::<ActivityLog>::new(store);

        let farm = farms.create("u1", &farm_attrs("u1")).await.unwrap();
        logs.create(&farm.id, &log_attrs(&farm.id, "sowing"))
            .await
            .unwrap();

        farms.delete(&farm.id).await.unwrap();
        assert!(farms.find(&farm.id).await.unwrap().is_none());
        assert_eq!(logs.list_by_owner(&farm.id).await.unwrap().len(), 1);
    }
}
