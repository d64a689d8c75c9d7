use evhub_domain::config::{AppConfig, BackendConfig, LoggingConfig, PlansConfig};
use evhub_domain::{FeatureValue, LimitCheck};
use serde_json::json;

#[test]
fn config_defaults_are_sane() {
    let backend = BackendConfig::default();
    assert_eq!(backend.url, "https://base44.app");
    assert!(backend.app_id.is_empty());
    assert!(backend.api_key.is_none());
    assert_eq!(backend.timeout_seconds, 30);
    assert_eq!(backend.health_retries, 0);

    let logging = LoggingConfig::default();
    assert_eq!(logging.level, "info");
    assert!(!logging.json);
    assert!(logging.directory.is_none());

    let plans = PlansConfig::default();
    assert_eq!(plans.default_slug, "starter");
    assert_eq!(plans.default_plan.name, "Starter");
    assert_eq!(
        plans.default_plan.check_limit("guests_per_event", 10),
        LimitCheck::WithinLimit { current: 10, max: 50 }
    );
    assert!(!plans.default_plan.is_enabled("custom_branding"));
}

#[test]
fn app_config_deserializes() {
    let raw = json!({
        "backend": { "url": "http://localhost:9000", "app_id": "app-1", "api_key": "secret" },
        "logging": { "level": "debug", "json": true },
        "plans": {
            "default_slug": "free",
            "default_plan": { "name": "Free", "guests_per_event": 10, "events": "unlimited" }
        }
    });

    let cfg: AppConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.backend.url, "http://localhost:9000");
    assert_eq!(cfg.backend.app_id, "app-1");
    assert_eq!(cfg.backend.api_key.as_deref(), Some("secret"));
    assert_eq!(cfg.backend.timeout_seconds, 30);
    assert_eq!(cfg.logging.level, "debug");
    assert!(cfg.logging.json);
    assert_eq!(cfg.plans.default_slug, "free");
    assert_eq!(cfg.plans.default_plan.name, "Free");
    assert_eq!(cfg.plans.default_plan.get("guests_per_event"), Some(&FeatureValue::Limit(10)));
    assert_eq!(cfg.plans.default_plan.get("events"), Some(&FeatureValue::Unlimited));
}

#[test]
fn default_plan_reads_from_toml() {
    let raw = r#"
        [plans]
        default_slug = "starter"

        [plans.default_plan]
        name = "Starter"
        max_events = 1
        custom_branding = false
        theme = "classic"
    "#;

    let cfg: AppConfig = toml::from_str(raw).expect("toml deserialize");
    let plan = &cfg.plans.default_plan;
    assert_eq!(plan.get("max_events"), Some(&FeatureValue::Limit(1)));
    assert_eq!(plan.get("custom_branding"), Some(&FeatureValue::Boolean(false)));
    assert_eq!(plan.get("theme"), Some(&FeatureValue::Raw("classic".into())));
}
