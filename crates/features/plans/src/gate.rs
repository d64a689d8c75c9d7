use evhub_domain::{LimitCheck, ResolvedPlan};
use std::fmt;

/// Gating outcome for one feature key of a resolved plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateDecision {
    pub feature_key: String,
    pub plan: String,
    pub enabled: bool,
    /// Present when a current usage was supplied.
    pub check: Option<LimitCheck>,
}

impl GateDecision {
    #[must_use]
    pub fn evaluate(plan: &ResolvedPlan, feature_key: &str, usage: Option<u64>) -> Self {
        Self {
            feature_key: feature_key.to_owned(),
            plan: plan.name.clone(),
            enabled: plan.is_enabled(feature_key),
            check: usage.map(|current| plan.check_limit(feature_key, current)),
        }
    }

    /// With a usage: whether one more unit fits. Without: whether the feature is on.
    #[must_use]
    pub const fn allowed(&self) -> bool {
        match &self.check {
            Some(check) => check.allows_more(),
            None => self.enabled,
        }
    }
}

impl fmt::Display for GateDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.allowed() { "allowed" } else { "blocked" };
        write!(f, "{} on {}: {verdict}", self.feature_key, self.plan)?;
        match self.check {
            Some(LimitCheck::Unlimited) => f.write_str(" (unlimited)"),
            Some(LimitCheck::WithinLimit { current, max } | LimitCheck::AtLimit { current, max }) => {
                write!(f, " ({current} of {max} used)")
            },
            Some(LimitCheck::NotIncluded) => f.write_str(" (no limit in plan)"),
            None => Ok(()),
        }
    }
}
