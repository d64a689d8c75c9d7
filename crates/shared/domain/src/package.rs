use crate::constants::{PACKAGE, PACKAGE_FEATURE};
use crate::entity::entity;
use crate::id::EntityId;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// A named subscription tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    /// Stable identifier users reference through `subscription_plan`.
    #[serde(default, deserialize_with = "crate::nullable::or_default")]
    pub slug: String,
    pub package_name: String,
    #[serde(default, deserialize_with = "crate::nullable::or_default")]
    pub package_features: Vec<PackageFeature>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Join row binding a feature to a package with a concrete value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageFeature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    pub feature_id: EntityId,
    /// Always a string on our side; numbers and booleans are stringified on the way in.
    #[serde(default, deserialize_with = "stringly")]
    pub feature_value: String,
    #[serde(default, deserialize_with = "crate::nullable::or_default")]
    pub is_unlimited: bool,
}

impl PackageFeature {
    #[must_use]
    pub fn new(feature_id: impl Into<EntityId>, feature_value: impl Into<String>) -> Self {
        Self {
            id: None,
            feature_id: feature_id.into(),
            feature_value: feature_value.into(),
            is_unlimited: false,
        }
    }

    #[must_use]
    pub fn unlimited(feature_id: impl Into<EntityId>) -> Self {
        Self { is_unlimited: true, ..Self::new(feature_id, "") }
    }
}

entity!(Package, PACKAGE);
entity!(PackageFeature, PACKAGE_FEATURE);

struct StringlyVisitor;

impl Visitor<'_> for StringlyVisitor {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string, number, boolean or null")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(v.to_owned())
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(v)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(v.to_string())
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(v.to_string())
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(v.to_string())
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(v.to_string())
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(String::new())
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(String::new())
    }
}

fn stringly<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    deserializer.deserialize_any(StringlyVisitor)
}
