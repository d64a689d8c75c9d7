use crate::constants::DEFAULT_PLAN_SLUG;
use crate::plan::{FeatureValue, ResolvedPlan};
use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level configuration shared by every EventHub application.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfigInner {
    pub backend: BackendConfig,
    pub logging: LoggingConfig,
    pub plans: PlansConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(flatten, default)]
    inner: Arc<AppConfigInner>,
}

impl Deref for AppConfig {
    type Target = AppConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for AppConfig {
    fn deref_mut(&mut self) -> &mut AppConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Hosted backend connection settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub url: String,
    pub app_id: String,
    pub api_key: Option<String>,
    pub timeout_seconds: u64,
    /// Health probes attempted at startup; `0` skips the probe.
    pub health_retries: u8,
}

/// Logger settings consumed by the applications.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
    pub directory: Option<PathBuf>,
    pub env_filter: Option<String>,
}

/// Plan resolution settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlansConfig {
    /// Slug assumed for users without a `subscription_plan`.
    pub default_slug: String,
    /// Plan handed out whenever resolution fails.
    pub default_plan: ResolvedPlan,
}

// --- Default ---

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: "https://base44.app".to_owned(),
            app_id: String::new(),
            api_key: None,
            timeout_seconds: 30,
            health_retries: 0,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), json: false, directory: None, env_filter: None }
    }
}

impl Default for PlansConfig {
    fn default() -> Self {
        Self { default_slug: DEFAULT_PLAN_SLUG.to_owned(), default_plan: starter_plan() }
    }
}

/// The built-in fallback plan.
#[must_use]
pub fn starter_plan() -> ResolvedPlan {
    ResolvedPlan::new("Starter")
        .with("max_events", FeatureValue::Limit(1))
        .with("guests_per_event", FeatureValue::Limit(50))
        .with("media_uploads", FeatureValue::Limit(25))
        .with("photobook_templates", FeatureValue::Boolean(false))
        .with("custom_branding", FeatureValue::Boolean(false))
        .with("rsvp_export", FeatureValue::Boolean(false))
        .with("advanced_analytics", FeatureValue::Boolean(false))
}
