use crate::constants::RSVP;
use crate::entity::entity;
use crate::id::EntityId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A guest's answer to an event invitation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rsvp {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    pub event_id: EntityId,
    pub guest_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_email: Option<String>,
    #[serde(default, deserialize_with = "crate::nullable::or_default")]
    pub status: RsvpStatus,
    /// Party size, the guest included.
    #[serde(
        default = "default_guest_count",
        deserialize_with = "crate::nullable::guest_count"
    )]
    pub guest_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

const fn default_guest_count() -> u32 {
    1
}

/// Unknown statuses are read as `Pending`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RsvpStatus {
    Attending,
    Declined,
    Maybe,
    #[default]
    #[serde(other)]
    Pending,
}

entity!(Rsvp, RSVP);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_count_and_status_use_defaults() {
        let rsvp: Rsvp = serde_json::from_value(json!({
            "event_id": 3, "guest_name": "Ana", "status": null, "guest_count": null
        }))
        .unwrap();

        assert_eq!(rsvp.status, RsvpStatus::Pending);
        assert_eq!(rsvp.guest_count, 1);
    }

    #[test]
    fn missing_count_is_one_guest() {
        let rsvp: Rsvp =
            serde_json::from_value(json!({"event_id": 3, "guest_name": "Ben", "status": "maybe"}))
                .unwrap();

        assert_eq!(rsvp.status, RsvpStatus::Maybe);
        assert_eq!(rsvp.guest_count, 1);
    }
}
