use clap::Parser;
use evhub::Platform;
use evhub::backend::MemoryBackend;
use evhub::domain::config::AppConfig;
use evhub_cli::{Cli, Command, run};
use serde_json::{Value, json};

fn platform() -> Platform {
    let backend = MemoryBackend::new();
    backend.seed("Feature", [
        json!({"id": 1, "feature_key": "guests_per_event", "feature_type": "limit"}),
        json!({"id": 2, "feature_key": "custom_branding", "feature_type": "boolean"}),
    ]);
    backend.seed(
        "Package",
        [json!({"id": 7, "slug": "pro", "package_name": "Pro", "package_features": [
            {"feature_id": 1, "feature_value": "200"},
            {"feature_id": 2, "feature_value": "true"}
        ]})],
    );
    backend.seed("User", [json!({"id": "u2", "email": "guest@example.com"})]);
    backend.seed(
        "Event",
        [
            json!({"id": 1, "title": "Spring Launch", "date": "2026-03-01", "created_date": "2026-01-05T10:00:00Z"}),
            json!({"id": 2, "title": "Winter Gala", "created_date": "2026-09-01T10:00:00Z"}),
        ],
    );
    backend.seed(
        "RSVP",
        [
            json!({"id": "a", "event_id": 2, "guest_name": "Ana", "status": "attending", "guest_count": 2}),
            json!({"id": "b", "event_id": 2, "guest_name": "Ben", "status": "declined"}),
        ],
    );
    backend.sign_in(json!({"id": "u1", "email": "host@example.com", "subscription_plan": "pro"}));
    Platform::with_backend(&AppConfig::default(), backend)
}

async fn output(command: Command) -> String {
    let mut out = Vec::new();
    run(&platform(), command, &mut out).await.unwrap();
    String::from_utf8(out).unwrap()
}

fn command(args: &[&str]) -> Command {
    Cli::try_parse_from(std::iter::once("evhub").chain(args.iter().copied())).unwrap().command
}

#[test]
fn parses_global_config_after_subcommand() {
    let cli = Cli::try_parse_from(["evhub", "gate", "guests_per_event", "--usage", "12", "--config", "local"])
        .unwrap();
    assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("local")));
    assert!(matches!(cli.command, Command::Gate { usage: Some(12), .. }));
}

#[test]
fn missing_subcommand_is_rejected() {
    assert!(Cli::try_parse_from(["evhub"]).is_err());
}

#[tokio::test]
async fn plan_prints_the_current_users_plan() {
    let printed: Value = serde_json::from_str(&output(command(&["plan"])).await).unwrap();
    assert_eq!(printed, json!({"name": "Pro", "guests_per_event": 200, "custom_branding": true}));
}

#[tokio::test]
async fn plan_for_another_user_falls_back_to_starter() {
    let printed: Value = serde_json::from_str(&output(command(&["plan", "--user", "u2"])).await).unwrap();
    assert_eq!(printed["name"], "Starter");
    assert_eq!(printed["guests_per_event"], 50);
}

#[tokio::test]
async fn plan_for_unknown_user_fails() {
    let mut out = Vec::new();
    let err = run(&platform(), command(&["plan", "--user", "nobody"]), &mut out).await.unwrap_err();
    assert_eq!(err.to_string(), "User nobody not found");
    assert!(out.is_empty());
}

#[tokio::test]
async fn gate_reports_limit_usage() {
    let text = output(command(&["gate", "guests_per_event", "--usage", "200"])).await;
    assert_eq!(text.trim(), "guests_per_event on Pro: blocked (200 of 200 used)");

    let text = output(command(&["gate", "custom_branding"])).await;
    assert_eq!(text.trim(), "custom_branding on Pro: allowed");
}

#[tokio::test]
async fn events_are_listed_newest_first() {
    let text = output(command(&["events"])).await;
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with('2') && lines[0].contains("undated") && lines[0].ends_with("Winter Gala"));
    assert!(lines[1].ends_with("Spring Launch"));

    let text = output(command(&["events", "--limit", "1"])).await;
    assert_eq!(text.lines().count(), 1);
}

#[tokio::test]
async fn stats_for_one_event() {
    let printed: Value = serde_json::from_str(&output(command(&["stats", "2"])).await).unwrap();
    assert_eq!(printed["total"], 2);
    assert_eq!(printed["attending"], 1);
    assert_eq!(printed["headcount"], 2);
    assert_eq!(printed["response_rate"], 1.0);
}

#[tokio::test]
async fn stats_summary_counts_everything() {
    let printed: Value = serde_json::from_str(&output(command(&["stats"])).await).unwrap();
    assert_eq!(printed["total_events"], 2);
    assert_eq!(printed["total_rsvps"], 2);
    assert_eq!(printed["undated_events"], 1);
}
