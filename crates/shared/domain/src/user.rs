use crate::constants::USER;
use crate::entity::entity;
use crate::id::EntityId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The authenticated account, as returned by the backend's `me` call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(default, deserialize_with = "crate::nullable::or_default")]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Slug of the subscribed package (e.g. `"pro"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_plan: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    /// Plan slug of the user, falling back to `default_slug` when unset or blank.
    #[must_use]
    pub fn plan_slug<'a>(&'a self, default_slug: &'a str) -> &'a str {
        self.subscription_plan.as_deref().filter(|s| !s.trim().is_empty()).unwrap_or(default_slug)
    }
}

entity!(User, USER);
