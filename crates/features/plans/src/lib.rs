//! # Plans
//!
//! Subscription entitlements. A user's `subscription_plan` slug names a package; the package
//! binds feature definitions to values. [`PlanResolver`] joins the two into a flat
//! [`ResolvedPlan`] (`{ name, guests_per_event: 200, custom_branding: true, .. }`) and
//! [`GateDecision`] answers whether the UI may let an action through.
//!
//! Resolution is forgiving by contract: [`PlanResolver::resolve`] hands out the configured
//! default plan on any failure, while [`PlanResolver::try_resolve`] reports the reason.
//!
//! Value coercion per feature type:
//!
//! | binding | resolved |
//! |---|---|
//! | `is_unlimited = true` | [`FeatureValue::Unlimited`] |
//! | `limit` | leading integer of the value ([`parse_int`]) |
//! | `boolean` | `value == "true"` |
//! | anything else | the raw string |
//!
//! [`ResolvedPlan`]: evhub_domain::ResolvedPlan
//! [`FeatureValue::Unlimited`]: evhub_domain::FeatureValue::Unlimited

mod error;
mod gate;
mod parse;
mod resolver;

pub use crate::error::{PlanError, PlanErrorExt};
pub use crate::gate::GateDecision;
pub use crate::parse::parse_int;
pub use crate::resolver::{PlanResolver, assemble};
