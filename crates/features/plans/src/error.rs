use evhub_entities::EntityError;
use std::borrow::Cow;

/// Why a plan could not be resolved. [`PlanResolver::resolve`] maps every variant to the
/// default plan; the distinction is diagnostic.
///
/// [`PlanResolver::resolve`]: crate::PlanResolver::resolve
#[evhub_derive::evhub_error]
pub enum PlanError {
    #[error("No feature definitions available{}", format_context(.context))]
    NoFeatures { context: Option<Cow<'static, str>> },

    #[error("No package with slug '{slug}'{}", format_context(.context))]
    PackageNotFound { slug: String, context: Option<Cow<'static, str>> },

    /// A `limit` feature whose value has no leading integer.
    #[error("Malformed value '{value}' for '{feature_key}'{}", format_context(.context))]
    MalformedValue { feature_key: String, value: String, context: Option<Cow<'static, str>> },

    #[error("Plan data unavailable{}: {source}", format_context(.context))]
    Backend { source: EntityError, context: Option<Cow<'static, str>> },
}
