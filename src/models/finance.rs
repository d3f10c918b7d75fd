// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Finance records: market, government schemes and loan status.

use crate::db::{collections, KeyStrategy, OwnedRecord, Record};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

fn default_loan_status() -> Option<String> {
    Some("none".to_string())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct FinanceAttributes {
    pub user_id: String,
    pub selling_market: Option<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub eligible_schemes: Vec<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub applied_schemes: Vec<String>,
    #[serde(default = "default_loan_status")]
    pub loan_status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct FinanceRecord {
    pub id: String,
    #[serde(flatten)]
    pub attributes: FinanceAttributes,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FinanceUpdate {
    #[serde(
        default,
        deserialize_with = "super::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub selling_market: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eligible_schemes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applied_schemes: Option<Vec<String>>,
    #[serde(
        default,
        deserialize_with = "super::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub loan_status: Option<Option<String>>,
}

impl Record for FinanceRecord {
    const COLLECTION: &'static str = collections::FINANCE;
    const NAME: &'static str = "Finance profile";
    type Patch = FinanceUpdate;
}

impl OwnedRecord for FinanceRecord {
    const OWNER_FIELD: &'static str = "userId";
    const KEY: KeyStrategy = KeyStrategy::Generated;
    const CREATED_AT: Option<&'static str> = Some("createdAt");
    type Create = FinanceAttributes;

    fn owner_of(create: &FinanceAttributes) -> &str {
        &create.user_id
    }
}
