use crate::constants::EVENT;
use crate::entity::entity;
use crate::id::EntityId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A hosted event (wedding, party, conference...).
///
/// `date` is kept as the backend sends it: either a calendar date (`2025-06-14`) or a full
/// RFC 3339 timestamp. Interpretation belongs to the consumers that need it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Photobook template picked for the event gallery.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photobook_template: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

entity!(Event, EVENT);
