//! Resolved plans: the flat, typed view of a user's entitlements consumed by gating logic.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Wire spelling of [`FeatureValue::Unlimited`].
pub const UNLIMITED: &str = "unlimited";

/// Key holding the plan name in the flat wire form; no feature may use it.
pub const NAME_KEY: &str = "name";

/// A single entitlement value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FeatureValue {
    Boolean(bool),
    Limit(i64),
    /// No cap.
    Unlimited,
    /// Untyped value, passed through as the backend stored it.
    Raw(String),
}

impl FeatureValue {
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_limit(&self) -> Option<Limit> {
        match self {
            Self::Limit(n) => Some(Limit::Finite(*n)),
            Self::Unlimited => Some(Limit::Unlimited),
            _ => None,
        }
    }
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Limit(n) => write!(f, "{n}"),
            Self::Unlimited => f.write_str(UNLIMITED),
            Self::Raw(s) => f.write_str(s),
        }
    }
}

impl Serialize for FeatureValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Boolean(b) => serializer.serialize_bool(*b),
            Self::Limit(n) => serializer.serialize_i64(*n),
            Self::Unlimited => serializer.serialize_str(UNLIMITED),
            Self::Raw(s) => serializer.serialize_str(s),
        }
    }
}

struct FeatureValueVisitor;

impl Visitor<'_> for FeatureValueVisitor {
    type Value = FeatureValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a boolean, an integer, \"unlimited\" or a string")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(FeatureValue::Boolean(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(FeatureValue::Limit(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        i64::try_from(v)
            .map(FeatureValue::Limit)
            .map_err(|_| E::custom(format!("limit {v} does not fit in i64")))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        if v.is_infinite() && v.is_sign_positive() {
            Ok(FeatureValue::Unlimited)
        } else {
            Err(E::custom(format!("limit {v} is not an integer")))
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        if v == UNLIMITED {
            Ok(FeatureValue::Unlimited)
        } else {
            Ok(FeatureValue::Raw(v.to_owned()))
        }
    }
}

impl<'de> Deserialize<'de> for FeatureValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(FeatureValueVisitor)
    }
}

/// A usage cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Limit {
    Finite(i64),
    Unlimited,
}

/// Outcome of comparing current usage with a plan limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitCheck {
    Unlimited,
    WithinLimit { current: u64, max: i64 },
    AtLimit { current: u64, max: i64 },
    /// The plan has no limit under that key.
    NotIncluded,
}

impl LimitCheck {
    /// Whether one more unit may be consumed.
    #[must_use]
    pub const fn allows_more(&self) -> bool {
        matches!(self, Self::Unlimited | Self::WithinLimit { .. })
    }
}

/// `{ name, [feature_key]: value }`, serialized flat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPlan {
    pub name: String,
    #[serde(flatten)]
    pub features: BTreeMap<String, FeatureValue>,
}

impl ResolvedPlan {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), features: BTreeMap::new() }
    }

    /// Builder-style insert, mostly for fixtures and defaults.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: FeatureValue) -> Self {
        self.features.insert(key.into(), value);
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FeatureValue> {
        self.features.get(key)
    }

    /// `true` for `Boolean(true)`, `Unlimited`, or a positive `Limit`.
    #[must_use]
    pub fn is_enabled(&self, key: &str) -> bool {
        match self.features.get(key) {
            Some(FeatureValue::Boolean(b)) => *b,
            Some(FeatureValue::Unlimited) => true,
            Some(FeatureValue::Limit(n)) => *n > 0,
            Some(FeatureValue::Raw(_)) | None => false,
        }
    }

    #[must_use]
    pub fn limit(&self, key: &str) -> Option<Limit> {
        self.features.get(key).and_then(FeatureValue::as_limit)
    }

    #[must_use]
    pub fn check_limit(&self, key: &str, current: u64) -> LimitCheck {
        match self.limit(key) {
            None => LimitCheck::NotIncluded,
            Some(Limit::Unlimited) => LimitCheck::Unlimited,
            Some(Limit::Finite(max)) => {
                let within = i64::try_from(current).is_ok_and(|used| used < max);
                if within {
                    LimitCheck::WithinLimit { current, max }
                } else {
                    LimitCheck::AtLimit { current, max }
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pro() -> ResolvedPlan {
        ResolvedPlan::new("Pro")
            .with("guests_per_event", FeatureValue::Limit(200))
            .with("events", FeatureValue::Unlimited)
            .with("custom_branding", FeatureValue::Boolean(true))
            .with("theme", FeatureValue::Raw("dark".into()))
            .with("media_uploads", FeatureValue::Limit(0))
    }

    #[test]
    fn serializes_flat() {
        let value = serde_json::to_value(pro()).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "Pro",
                "guests_per_event": 200,
                "events": "unlimited",
                "custom_branding": true,
                "theme": "dark",
                "media_uploads": 0,
            })
        );
    }

    #[test]
    fn deserializes_flat() {
        let plan: ResolvedPlan = serde_json::from_value(json!({
            "name": "Pro",
            "guests_per_event": 200,
            "events": "unlimited",
            "custom_branding": true,
            "theme": "dark",
            "media_uploads": 0,
        }))
        .unwrap();
        assert_eq!(plan, pro());
    }

    #[test]
    fn only_the_exact_spelling_is_unlimited() {
        let values: Vec<FeatureValue> =
            serde_json::from_value(json!(["unlimited", "Unlimited", "UNLIMITED"])).unwrap();
        assert_eq!(
            values,
            [
                FeatureValue::Unlimited,
                FeatureValue::Raw("Unlimited".into()),
                FeatureValue::Raw("UNLIMITED".into()),
            ]
        );

        let raw = FeatureValue::Raw("Unlimited".into());
        let back: FeatureValue = serde_json::from_value(serde_json::to_value(&raw).unwrap()).unwrap();
        assert_eq!(back, raw);
    }

    #[test]
    fn enabled_features() {
        let plan = pro();
        assert!(plan.is_enabled("custom_branding"));
        assert!(plan.is_enabled("events"));
        assert!(plan.is_enabled("guests_per_event"));
        assert!(!plan.is_enabled("media_uploads"));
        assert!(!plan.is_enabled("theme"));
        assert!(!plan.is_enabled("missing"));
    }

    #[test]
    fn limit_checks() {
        let plan = pro();
        assert_eq!(
            plan.check_limit("guests_per_event", 199),
            LimitCheck::WithinLimit { current: 199, max: 200 }
        );
        assert_eq!(
            plan.check_limit("guests_per_event", 200),
            LimitCheck::AtLimit { current: 200, max: 200 }
        );
        assert_eq!(plan.check_limit("events", u64::MAX), LimitCheck::Unlimited);
        assert_eq!(plan.check_limit("custom_branding", 0), LimitCheck::NotIncluded);
        assert_eq!(plan.check_limit("missing", 0), LimitCheck::NotIncluded);
        assert!(!plan.check_limit("media_uploads", 0).allows_more());
    }
}
