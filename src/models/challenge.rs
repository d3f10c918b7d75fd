// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Challenge profiles (pests, diseases, weather losses, market access),
//! tracked per farm and per user like resource profiles.

use crate::db::{collections, KeyStrategy, OwnedRecord, Record};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeFields {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub past_pests: Vec<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub past_diseases: Vec<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub weather_losses: Vec<String>,
    pub market_access: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FarmChallengeAttributes {
    pub farm_id: String,
    #[serde(flatten)]
    pub challenges: ChallengeFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserChallengeAttributes {
    pub user_id: String,
    #[serde(flatten)]
    pub challenges: ChallengeFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct FarmChallengeProfile {
    pub id: String,
    pub farm_id: String,
    #[serde(flatten)]
    pub challenges: ChallengeFields,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct UserChallengeProfile {
    pub id: String,
    pub user_id: String,
    #[serde(flatten)]
    pub challenges: ChallengeFields,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub past_pests: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub past_diseases: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather_losses: Option<Vec<String>>,
    #[serde(
        default,
        deserialize_with = "super::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub market_access: Option<Option<String>>,
}

impl Record for FarmChallengeProfile {
    const COLLECTION: &'static str = collections::CHALLENGES;
    const NAME: &'static str = "Challenge profile";
    type Patch = ChallengeUpdate;
}

impl OwnedRecord for FarmChallengeProfile {
    const OWNER_FIELD: &'static str = "farmId";
    const KEY: KeyStrategy = KeyStrategy::Owner;
    const CREATED_AT: Option<&'static str> = Some("createdAt");
    type Create = FarmChallengeAttributes;

    fn owner_of(create: &FarmChallengeAttributes) -> &str {
        &create.farm_id
    }
}

impl Record for UserChallengeProfile {
    const COLLECTION: &'static str = collections::USER_CHALLENGES;
    const NAME: &'static str = "Challenge profile";
    type Patch = ChallengeUpdate;
}

impl OwnedRecord for UserChallengeProfile {
    const OWNER_FIELD: &'static str = "userId";
    const KEY: KeyStrategy = KeyStrategy::Owner;
    const CREATED_AT: Option<&'static str> = Some("createdAt");
    type Create = UserChallengeAttributes;

    fn owner_of(create: &UserChallengeAttributes) -> &str {
        &create.user_id
    }
}
