// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Chat messages exchanged about a farm.

use crate::db::{collections, KeyStrategy, OrderBy, OwnedRecord, Record};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
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
pub struct ChatAttributes {
    pub farm_id: String,
    /// Sender kind, e.g. "user" or "assistant"
    #[validate(length(min = 1, max = 50))]
    pub message_type: String,
    #[validate(length(min = 1, max = 10000))]
    pub message_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    #[serde(flatten)]
    pub attributes: ChatAttributes,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChatUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 10000))]
    pub message_text: Option<String>,
}

impl Record for ChatMessage {
    const COLLECTION: &'static str = collections::CHATS;
    const NAME: &'static str = "Chat message";
    type Patch = ChatUpdate;
}

impl OwnedRecord for ChatMessage {
    const OWNER_FIELD: &'static str = "farmId";
    const KEY: KeyStrategy = KeyStrategy::Generated;
    const CREATED_AT: Option<&'static str> = Some("timestamp");
    /// Conversation order, oldest first
    const LIST_ORDER: Option<OrderBy> = Some(OrderBy::asc("timestamp"));
    type Create = ChatAttributes;

    fn owner_of(create: &ChatAttributes) -> &str {
        &create.farm_id
    }
}
