use crate::constants::MEDIA;
use crate::entity::entity;
use crate::id::EntityId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A photo or video uploaded to an event gallery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Media {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    pub event_id: EntityId,
    pub file_url: String,
    #[serde(default, deserialize_with = "crate::nullable::or_default")]
    pub media_type: MediaType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploaded_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    #[default]
    Image,
    Video,
    #[serde(other)]
    Other,
}

entity!(Media, MEDIA);
