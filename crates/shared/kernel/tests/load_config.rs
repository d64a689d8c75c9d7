use evhub_kernel::config::{ConfigError, load_config};
use evhub_kernel::domain::config::AppConfig;
use evhub_kernel::domain::{FeatureValue, LimitCheck};
use std::fs;
use tempfile::tempdir;

#[test]
fn loads_app_config_from_toml() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("evhub.toml");
    fs::write(
        &path,
        r#"
        [backend]
        url = "http://127.0.0.1:8080"
        app_id = "app-42"
        timeout_seconds = 5

        [logging]
        level = "debug"

        [plans]
        default_slug = "free"

        [plans.default_plan]
        name = "Free"
        guests_per_event = 10
        rsvp_export = false
        "#,
    )?;

    let cfg: AppConfig = load_config(Some(&path))?;
    assert_eq!(cfg.backend.url, "http://127.0.0.1:8080");
    assert_eq!(cfg.backend.app_id, "app-42");
    assert_eq!(cfg.backend.timeout_seconds, 5);
    assert_eq!(cfg.backend.health_retries, 0);
    assert_eq!(cfg.logging.level, "debug");
    assert_eq!(cfg.plans.default_slug, "free");

    let plan = &cfg.plans.default_plan;
    assert_eq!(plan.name, "Free");
    assert_eq!(plan.get("rsvp_export"), Some(&FeatureValue::Boolean(false)));
    assert_eq!(plan.check_limit("guests_per_event", 3), LimitCheck::WithinLimit { current: 3, max: 10 });
    Ok(())
}

#[test]
fn missing_sections_fall_back_to_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("minimal.json");
    fs::write(&path, r#"{ "backend": { "app_id": "only-this" } }"#)?;

    let cfg: AppConfig = load_config(Some(&path))?;
    assert_eq!(cfg.backend.app_id, "only-this");
    assert_eq!(cfg.backend.url, "https://base44.app");
    assert_eq!(cfg.plans.default_plan.name, "Starter");
    Ok(())
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempdir().expect("temp dir");
    let err = load_config::<AppConfig>(Some(dir.path().join("absent.toml"))).unwrap_err();
    assert!(matches!(err, ConfigError::Config { context: Some(_), .. }));
    assert!(err.to_string().starts_with("Config error (Failed to build config)"));
}
