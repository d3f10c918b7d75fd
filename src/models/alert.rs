// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Alerts and reminders addressed to a user.

use crate::db::{collections, KeyStrategy, OrderBy, OwnedRecord, Record};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

fn default_status() -> String {
    "unread".to_string()
}

fn default_priority() -> u8 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct AlertAttributes {
    pub user_id: String,
    #[validate(length(min = 1, max = 100))]
    pub alert_type: String,
    #[validate(length(min = 1, max = 2000))]
    pub message: String,
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default = "default_status")]
    pub status: String,
    /// 3 = high, 2 = medium, 1 = low
    #[serde(default = "default_priority")]
    #[validate(range(min = 1, max = 3))]
    pub priority: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: String,
    #[serde(flatten)]
    pub attributes: AlertAttributes,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AlertUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 2000))]
    pub message: Option<String>,
    #[serde(
        default,
        deserialize_with = "super::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<Option<DateTime<Utc>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 3))]
    pub priority: Option<u8>,
}

impl Record for Alert {
    const COLLECTION: &'static str = collections::ALERTS;
    const NAME: &'static str = "Alert";
    type Patch = AlertUpdate;
}

impl OwnedRecord for Alert {
    const OWNER_FIELD: &'static str = "userId";
    const KEY: KeyStrategy = KeyStrategy::Generated;
    const CREATED_AT: Option<&'static str> = Some("createdAt");
    /// Newest first
    const LIST_ORDER: Option<OrderBy> = Some(OrderBy::desc("createdAt"));
    type Create = AlertAttributes;

    fn owner_of(create: &AlertAttributes) -> &str {
        &create.user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_and_priority_range() {
        let attrs: AlertAttributes = serde_json::from_value(json!({
            "userId": "u1",
            "alertType": "irrigation",
            "message": "Water the paddy field",
        }))
        .unwrap();
        assert_eq!(attrs.status, "unread");
        assert_eq!(attrs.priority, 1);
        assert!(attrs.validate().is_ok());

        let bad = AlertAttributes {
            priority: 5,
            ..attrs
        };
        assert!(bad.validate().is_err());
    }
}
