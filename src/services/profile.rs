// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Deep profile fetch: a user and everything they own in one response.
//!
//! Each read observes the store at its own instant, so the aggregate is not
//! a point-in-time snapshot. A farm edited mid-fetch may show its old
//! fields next to new child records.

use crate::db::{DocumentStore, Repository};
use crate::error::Result;
use crate::models::{
    ActivityLog, Alert, ChatMessage, CropProfile, Farm, FarmBundle, FarmChallengeProfile,
    FarmResourceProfile, FinanceRecord, FullProfile, SoilProfile, User,
};
use futures_util::{stream, StreamExt, TryStreamExt};
use std::sync::Arc;

/// Farms expanded at the same time. Each farm issues six reads.
const MAX_CONCURRENT_FARMS: usize = 8;

#[derive(Clone)]
pub struct ProfileAggregator {
    users: Repository<User>,
    finance: Repository<FinanceRecord>,
    alerts: Repository<Alert>,
    farms: Repository<Farm>,
    crops: Repository<CropProfile>,
    resources: Repository<FarmResourceProfile>,
    challenges: Repository<FarmChallengeProfile>,
    soil: Repository<SoilProfile>,
    logs: Repository<ActivityLog>,
    chats: Repository<ChatMessage>,
}

impl ProfileAggregator {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            users: Repository::new(store.clone()),
            finance: Repository::new(store.clone()),
            alerts: Repository::new(store.clone()),
            farms: Repository::new(store.clone()),
            crops: Repository::new(store.clone()),
            resources: Repository::new(store.clone()),
            challenges: Repository::new(store.clone()),
            soil: Repository::new(store.clone()),
            logs: Repository::new(store.clone()),
            chats: Repository::new(store),
        }
    }

    /// Fetch the full profile for `user_id`.
    ///
    /// A missing user is the only not-found outcome; nothing else is read in
    /// that case. Any other store failure fails the whole fetch.
    pub async fn fetch(&self, user_id: &str) -> Result<FullProfile> {
        let profile = self.users.get(user_id).await?;

        let (finance_records, alerts, farms) = tokio::try_join!(
            self.finance.list_by_owner(user_id),
            self.alerts.list_by_owner(user_id),
            self.farms.list_by_owner(user_id),
        )?;

        let farm_count = farms.len();

        // buffered() keeps the listing order of the farms
        let farms: Vec<FarmBundle> = stream::iter(farms)
            .map(|farm| self.expand_farm(farm))
            .buffered(MAX_CONCURRENT_FARMS)
            .try_collect()
            .await?;

        tracing::debug!(
            user_id,
            farms = farm_count,
            finance_records = finance_records.len(),
            alerts = alerts.len(),
            "Deep profile assembled"
        );

        Ok(FullProfile {
            profile,
            finance_records,
            alerts,
            farms,
        })
    }

    async fn expand_farm(&self, farm: Farm) -> Result<FarmBundle> {
        let farm_id = farm.id.as_str();

        let (
            crop_profile,
            resource_profile,
            challenge_profile,
            soil_profiles,
            activity_logs,
            chat_history,
        ) = tokio::try_join!(
            self.crops.find(farm_id),
            self.resources.find(farm_id),
            self.challenges.find(farm_id),
            self.soil.list_by_owner(farm_id),
            self.logs.list_by_owner(farm_id),
            self.chats.list_by_owner(farm_id),
        )?;

        Ok(FarmBundle {
            farm,
            crop_profile,
            resource_profile,
            challenge_profile,
            soil_profiles,
            activity_logs,
            chat_history,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{collections, Document, FieldFilter, MemoryDb, OrderBy, StoredDocument};
    use crate::error::AppError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Wraps a memory store, counting queries and optionally failing one
    /// collection.
    struct ProbeStore {
        inner: MemoryDb,
        queries: AtomicUsize,
        fail_collection: Option<&'static str>,
    }

    impl ProbeStore {
        fn new(inner: MemoryDb, fail_collection: Option<&'static str>) -> Self {
            Self {
                inner,
                queries: AtomicUsize::new(0),
                fail_collection,
            }
        }
    }

    #[async_trait]
    impl DocumentStore for ProbeStore {
        async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>> {
            self.inner.get(collection, id).await
        }

        async fn add(&self, collection: &str, fields: &Document) -> Result<String> {
            self.inner.add(collection, fields).await
        }

        async fn set(&self, collection: &str, id: &str, fields: &Document) -> Result<()> {
            self.inner.set(collection, id, fields).await
        }

        async fn update(&self, collection: &str, id: &str, fields: &Document) -> Result<()> {
            self.inner.update(collection, id, fields).await
        }

        async fn delete(&self, collection: &str, id: &str) -> Result<()> {
            self.inner.delete(collection, id).await
        }

        async fn query(
            &self,
            collection: &str,
            filter: Option<FieldFilter>,
            order: Option<OrderBy>,
            limit: Option<u32>,
        ) -> Result<Vec<StoredDocument>> {
            self.queries.fetch_add(1, Ordering::SeqCst);
            if self.fail_collection == Some(collection) {
                return Err(AppError::Database("injected failure".to_string()));
            }
            self.inner.query(collection, filter, order, limit).await
        }
    }

    async fn seed_user(db: &MemoryDb, id: &str) {
        let fields = crate::db::to_document(&serde_json::json!({
            "fullName": "Suresh P",
            "phone": "9000000010",
            "createdAt": "2025-06-01T00:00:00.000000Z",
            "lastLogin": null,
        }))
        .unwrap();
        db.set(collections::USERS, id, &fields).await.unwrap();
    }

    async fn seed_farm(db: &MemoryDb, id: &str, user_id: &str, village: &str) {
        let fields = crate::db::to_document(&serde_json::json!({
            "userId": user_id,
            "village": village,
            "lastUpdated": "2025-06-01T00:00:00.000000Z",
        }))
        .unwrap();
        db.set(collections::FARMS, id, &fields).await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_user_queries_nothing() {
        let probe = Arc::new(ProbeStore::new(MemoryDb::new(), None));
        let aggregator = ProfileAggregator::new(probe.clone());

        let err = aggregator.fetch("ghost").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(probe.queries.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_user_without_farms() {
        let db = MemoryDb::new();
        seed_user(&db, "u1").await;
        let aggregator = ProfileAggregator::new(Arc::new(db));

        let full = aggregator.fetch("u1").await.unwrap();
        assert_eq!(full.profile.id, "u1");
        assert!(full.farms.is_empty());
        assert!(full.finance_records.is_empty());
        assert!(full.alerts.is_empty());
    }

    #[tokio::test]
    async fn test_farms_keep_listing_order_and_absent_profiles_are_none() {
        let db = MemoryDb::new();
        seed_user(&db, "u1").await;
        for (id, village) in [("f-a", "Alappuzha"), ("f-b", "Kumarakom"), ("f-c", "Thrissur")] {
            seed_farm(&db, id, "u1", village).await;
        }
        seed_farm(&db, "f-other", "u2", "Palakkad").await;

        let aggregator = ProfileAggregator::new(Arc::new(db));
        let full = aggregator.fetch("u1").await.unwrap();

        let ids: Vec<&str> = full.farms.iter().map(|b| b.farm.id.as_str()).collect();
        assert_eq!(ids, vec!["f-a", "f-b", "f-c"]);
        assert!(full.farms.iter().all(|b| b.crop_profile.is_none()));
        assert!(full.farms.iter().all(|b| b.chat_history.is_empty()));
    }

    #[tokio::test]
    async fn test_store_failure_fails_whole_fetch() {
        let db = MemoryDb::new();
        seed_user(&db, "u1").await;
        seed_farm(&db, "f-a", "u1", "Alappuzha").await;

        let probe = Arc::new(ProbeStore::new(db, Some(collections::LOGS)));
        let aggregator = ProfileAggregator::new(probe);

        let err = aggregator.fetch("u1").await.unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
    }
}
