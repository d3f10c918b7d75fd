// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Farm activity log entries (sowing, spraying, harvest...).

use crate::db::{collections, KeyStrategy, OrderBy, OwnedRecord, Record};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct LogAttributes {
    pub farm_id: String,
    #[validate(length(min = 1, max = 100))]
    pub activity_type: String,
    #[validate(length(min = 1, max = 5000))]
    pub description: String,
    /// e.g. `{"lat": 9.59, "lng": 76.52}`
    pub geo_location: Option<HashMap<String, f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLog {
    pub id: String,
    #[serde(flatten)]
    pub attributes: LogAttributes,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LogUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 100))]
    pub activity_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 5000))]
    pub description: Option<String>,
    #[serde(
        default,
        deserialize_with = "super::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub geo_location: Option<Option<HashMap<String, f64>>>,
}

impl Record for ActivityLog {
    const COLLECTION: &'static str = collections::LOGS;
    const NAME: &'static str = "Log";
    type Patch = LogUpdate;
}

impl OwnedRecord for ActivityLog {
    const OWNER_FIELD: &'static str = "farmId";
    const KEY: KeyStrategy = KeyStrategy::Generated;
    const CREATED_AT: Option<&'static str> = Some("timestamp");
    /// Newest first
    const LIST_ORDER: Option<OrderBy> = Some(OrderBy::desc("timestamp"));
    type Create = LogAttributes;

    fn owner_of(create: &LogAttributes) -> &str {
        &create.farm_id
    }
}
