use crate::error::{PlanError, PlanErrorExt};
use crate::parse::parse_int;
use evhub_backend::ListQuery;
use evhub_domain::config::PlansConfig;
use evhub_domain::constants::DEFAULT_PLAN_SLUG;
use evhub_domain::plan::NAME_KEY;
use evhub_domain::{
    EntityId, Feature, FeatureType, FeatureValue, Package, PackageFeature, ResolvedPlan, User,
};
use evhub_entities::Entities;
use fxhash::FxHashMap;
use tracing::{debug, info, instrument, warn};

/// Joins a user's subscription package with the feature definitions into a [`ResolvedPlan`].
///
/// Holds no state besides the fallback plan: features and the package are fetched fresh on
/// every call, features first, so an empty catalogue never costs a package request.
#[derive(Debug, Clone)]
pub struct PlanResolver {
    entities: Entities,
    default_plan: ResolvedPlan,
    default_slug: String,
}

impl PlanResolver {
    /// Resolver falling back to `default_plan`, with `"starter"` as the slug of users without
    /// a subscription.
    #[must_use]
    pub fn new(entities: Entities, default_plan: ResolvedPlan) -> Self {
        Self { entities, default_plan, default_slug: DEFAULT_PLAN_SLUG.to_owned() }
    }

    #[must_use]
    pub fn from_config(entities: Entities, config: &PlansConfig) -> Self {
        Self::new(entities, config.default_plan.clone()).with_default_slug(&config.default_slug)
    }

    #[must_use]
    pub fn with_default_slug(mut self, slug: impl Into<String>) -> Self {
        self.default_slug = slug.into();
        self
    }

    #[must_use]
    pub const fn default_plan(&self) -> &ResolvedPlan {
        &self.default_plan
    }

    /// Resolves the plan of `user`, never failing: any problem yields the default plan.
    #[instrument(skip_all, fields(user = ?user.id, slug = user.plan_slug(&self.default_slug)))]
    pub async fn resolve(&self, user: &User) -> ResolvedPlan {
        match self.try_resolve(user).await {
            Ok(plan) => {
                debug!(plan = %plan.name, features = plan.features.len(), "Plan resolved");
                plan
            },
            Err(e @ (PlanError::NoFeatures { .. } | PlanError::PackageNotFound { .. })) => {
                info!(reason = %e, plan = %self.default_plan.name, "Using default plan");
                self.default_plan.clone()
            },
            Err(e) => {
                warn!(error = %e, plan = %self.default_plan.name, "Plan resolution failed, using default plan");
                self.default_plan.clone()
            },
        }
    }

    /// Same algorithm as [`PlanResolver::resolve`], reporting why resolution failed.
    ///
    /// # Errors
    /// * [`PlanError::NoFeatures`] when the feature catalogue is empty (the package is not
    ///   fetched);
    /// * [`PlanError::PackageNotFound`] when no package has the user's slug;
    /// * [`PlanError::MalformedValue`] for a `limit` value without a leading integer;
    /// * [`PlanError::Backend`] when a fetch fails or returns undecodable records.
    pub async fn try_resolve(&self, user: &User) -> Result<ResolvedPlan, PlanError> {
        let features =
            self.entities.features().list(&ListQuery::new()).await.context("fetching features")?;
        if features.is_empty() {
            return Err(PlanError::NoFeatures { context: None });
        }

        let slug = user.plan_slug(&self.default_slug);
        let package = self
            .entities
            .packages()
            .get_by_slug(slug)
            .await
            .context("fetching package")?
            .ok_or_else(|| PlanError::PackageNotFound { slug: slug.to_owned(), context: None })?;

        assemble(&package, &features)
    }
}

/// Builds `{ name: package_name, feature_key: value, .. }` from a package and the catalogue.
///
/// Bindings whose feature is not in `features` are skipped, as are features keyed `name`, which
/// would clash with the plan name. When two bindings map to the same key, the later one wins.
///
/// # Errors
/// [`PlanError::MalformedValue`] for a `limit` binding whose value has no leading integer.
pub fn assemble(package: &Package, features: &[Feature]) -> Result<ResolvedPlan, PlanError> {
    let by_id: FxHashMap<&EntityId, &Feature> =
        features.iter().filter_map(|f| f.id.as_ref().map(|id| (id, f))).collect();

    let mut plan = ResolvedPlan::new(package.package_name.clone());
    for binding in &package.package_features {
        let Some(feature) = by_id.get(&binding.feature_id) else {
            debug!(feature_id = %binding.feature_id, package = %package.package_name, "Skipping unknown feature");
            continue;
        };
        if feature.feature_key == NAME_KEY {
            debug!(package = %package.package_name, "Skipping feature keyed `name`");
            continue;
        }
        let value = coerce(feature, binding)?;
        plan.features.insert(feature.feature_key.clone(), value);
    }
    Ok(plan)
}

/// Interprets one binding according to its feature's declared type.
fn coerce(feature: &Feature, binding: &PackageFeature) -> Result<FeatureValue, PlanError> {
    if binding.is_unlimited {
        return Ok(FeatureValue::Unlimited);
    }
    let raw = &binding.feature_value;
    match feature.feature_type {
        FeatureType::Limit => parse_int(raw).map(FeatureValue::Limit).ok_or_else(|| {
            PlanError::MalformedValue {
                feature_key: feature.feature_key.clone(),
                value: raw.clone(),
                context: None,
            }
        }),
        FeatureType::Boolean => Ok(FeatureValue::Boolean(raw == "true")),
        FeatureType::Other => Ok(FeatureValue::Raw(raw.clone())),
    }
}
