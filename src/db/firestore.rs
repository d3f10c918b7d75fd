// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore implementation of [`DocumentStore`].
//!
//! Documents are written as plain field maps. Timestamps are RFC3339 strings
//! rather than native Firestore timestamps, so ordering by them needs only
//! the composite indexes for (owner field, timestamp) on `logs`, `chats` and
//! `alerts`.

use crate::db::{
    new_document_id, Document, DocumentStore, FieldFilter, OrderBy, SortDirection, StoredDocument,
};
use crate::error::AppError;
use async_trait::async_trait;
use firestore::errors::FirestoreError;
use firestore::FirestoreResult;
use firestore::FirestoreWritePrecondition;
use std::future::Future;
use std::time::Duration;

/// Metadata keys the firestore crate adds to deserialized documents.
const FIRESTORE_META_PREFIX: &str = "_firestore";
const FIRESTORE_ID_FIELD: &str = "_firestore_id";

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
    timeout: Duration,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str, timeout: Duration) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id, timeout).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
            timeout,
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str, timeout: Duration) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
            timeout,
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self {
            client: None,
            timeout: Duration::from_secs(1),
        }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    /// Run one Firestore call under the configured timeout.
    async fn bounded<T, F>(
        &self,
        op: &'static str,
        collection: &str,
        fut: F,
    ) -> Result<T, AppError>
    where
        F: Future<Output = FirestoreResult<T>>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result.map_err(|e| store_error(op, collection, e)),
            Err(_) => {
                tracing::warn!(op, collection, timeout = ?self.timeout, "Firestore call timed out");
                Err(AppError::Database(format!(
                    "Firestore {} on {} timed out after {:?}",
                    op, collection, self.timeout
                )))
            }
        }
    }
}

/// A failed exists-precondition comes back as NOT_FOUND.
fn store_error(op: &str, collection: &str, err: FirestoreError) -> AppError {
    match err {
        FirestoreError::DataNotFoundError(e) => {
            AppError::NotFound(format!("Firestore {} on {}: {}", op, collection, e))
        }
        other => AppError::Database(other.to_string()),
    }
}

fn strip_metadata(mut fields: Document) -> Document {
    fields.retain(|key, _| !key.starts_with(FIRESTORE_META_PREFIX));
    fields
}

#[async_trait]
impl DocumentStore for FirestoreDb {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, AppError> {
        let client = self.get_client()?;
        let doc: Option<Document> = self
            .bounded(
                "get",
                collection,
                client
                    .fluent()
                    .select()
                    .by_id_in(collection)
                    .obj()
                    .one(id),
            )
            .await?;
        Ok(doc.map(strip_metadata))
    }

    async fn add(&self, collection: &str, fields: &Document) -> Result<String, AppError> {
        let id = new_document_id();
        self.set(collection, &id, fields).await?;
        Ok(id)
    }

    async fn set(&self, collection: &str, id: &str, fields: &Document) -> Result<(), AppError> {
        let client = self.get_client()?;
        let _: () = self
            .bounded(
                "set",
                collection,
                client
                    .fluent()
                    .update()
                    .in_col(collection)
                    .document_id(id)
                    .object(fields)
                    .execute(),
            )
            .await?;
        Ok(())
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        fields: &Document,
    ) -> Result<(), AppError> {
        let client = self.get_client()?;
        // The field mask limits the write to the keys present in `fields`;
        // it fails if the document no longer exists
        let _: () = self
            .bounded(
                "update",
                collection,
                client
                    .fluent()
                    .update()
                    .fields(fields.keys())
                    .in_col(collection)
                    .precondition(FirestoreWritePrecondition::Exists(true))
                    .document_id(id)
                    .object(fields)
                    .execute(),
            )
            .await?;
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), AppError> {
        let client = self.get_client()?;
        self.bounded(
            "delete",
            collection,
            client
                .fluent()
                .delete()
                .from(collection)
                .document_id(id)
                .execute(),
        )
        .await
    }

    async fn query(
        &self,
        collection: &str,
        filter: Option<FieldFilter>,
        order: Option<OrderBy>,
        limit: Option<u32>,
    ) -> Result<Vec<StoredDocument>, AppError> {
        let client = self.get_client()?;

        let mut query = client.fluent().select().from(collection);

        if let Some(filter) = filter {
            query = query.filter(move |q| q.field(filter.field).eq(filter.value.clone()));
        }

        if let Some(order) = order {
            let direction = match order.direction {
                SortDirection::Ascending => firestore::FirestoreQueryDirection::Ascending,
                SortDirection::Descending => firestore::FirestoreQueryDirection::Descending,
            };
            query = query.order_by([(order.field, direction)]);
        }

        if let Some(limit) = limit {
            query = query.limit(limit);
        }

        let docs: Vec<Document> = self
            .bounded("query", collection, query.obj().query())
            .await?;

        docs.into_iter()
            .map(|fields| {
                let id = fields
                    .get(FIRESTORE_ID_FIELD)
                    .and_then(|v| v.as_str())
                    .map(str::to_string)
                    .ok_or_else(|| {
                        AppError::Database(format!(
                            "Document in {} returned without an id",
                            collection
                        ))
                    })?;
                Ok(StoredDocument {
                    id,
                    fields: strip_metadata(fields),
                })
            })
            .collect()
    }
}
