use crate::constants::FEATURE;
use crate::entity::entity;
use crate::id::EntityId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A remotely defined capability descriptor (e.g. "max guests per event").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    /// Key used in resolved plans and gating checks (e.g. `guests_per_event`).
    pub feature_key: String,
    #[serde(default, deserialize_with = "crate::nullable::or_default")]
    pub feature_type: FeatureType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// How a package binding's `feature_value` is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureType {
    Limit,
    Boolean,
    #[default]
    #[serde(other)]
    Other,
}

entity!(Feature, FEATURE);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn feature_type_null_or_unknown_is_other() {
        let features: Vec<Feature> = serde_json::from_value(json!([
            {"id": 1, "feature_key": "a", "feature_type": null},
            {"id": 2, "feature_key": "b", "feature_type": "tiered"},
            {"id": 3, "feature_key": "c"},
            {"id": 4, "feature_key": "d", "feature_type": "limit"},
        ]))
        .unwrap();

        let types: Vec<FeatureType> = features.iter().map(|f| f.feature_type).collect();
        assert_eq!(types, [FeatureType::Other, FeatureType::Other, FeatureType::Other, FeatureType::Limit]);
    }
}
