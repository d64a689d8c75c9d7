use chrono::{TimeZone, Utc};
use evhub_backend::MemoryBackend;
use evhub_dashboard::{Dashboard, DashboardError};
use evhub_domain::EntityId;
use evhub_entities::Entities;
use serde_json::json;

fn dashboard() -> (MemoryBackend, Dashboard) {
    let backend = MemoryBackend::new();
    backend.seed(
        "Event",
        [
            json!({"id": 1, "title": "Spring Launch", "date": "2026-03-01", "created_date": "2026-01-05T10:00:00Z"}),
            json!({"id": 2, "title": "Winter Gala", "date": "2026-12-12", "created_date": "2026-09-01T10:00:00Z"}),
        ],
    );
    backend.seed(
        "RSVP",
        [
            json!({"id": "a", "event_id": 1, "guest_name": "Ana", "status": "attending", "guest_count": 2, "created_date": "2026-02-01T09:00:00Z"}),
            json!({"id": "b", "event_id": 2, "guest_name": "Ben", "status": "attending", "guest_count": 3, "created_date": "2026-09-10T09:00:00Z"}),
            json!({"id": "c", "event_id": 2, "guest_name": "Cy", "status": "declined", "created_date": "2026-09-10T18:00:00Z"}),
            json!({"id": "d", "event_id": "2", "guest_name": "Di", "created_date": "2026-09-11T07:00:00Z"}),
        ],
    );
    backend.seed("Media", [json!({"id": 1, "event_id": 1, "file_url": "https://cdn/x.jpg"})]);
    (backend.clone(), Dashboard::new(Entities::new(backend)))
}

#[tokio::test]
async fn summary_aggregates_all_collections() {
    let (_, dashboard) = dashboard();
    let now = Utc.with_ymd_and_hms(2026, 10, 18, 0, 0, 0).unwrap();

    let summary = dashboard.summary(now).await.unwrap();

    assert_eq!(summary.total_events, 2);
    assert_eq!((summary.upcoming_events, summary.past_events), (1, 1));
    assert_eq!(summary.total_rsvps, 4);
    assert_eq!(summary.total_media, 1);
    assert_eq!(summary.rsvps.headcount, 5);
}

#[tokio::test]
async fn event_stats_only_count_that_event() {
    let (_, dashboard) = dashboard();

    let stats = dashboard.event_stats(&EntityId::from(2_u64)).await.unwrap();

    assert_eq!(stats.total, 3);
    assert_eq!((stats.attending, stats.declined, stats.pending), (1, 1, 1));
    assert_eq!(stats.headcount, 3);
}

#[tokio::test]
async fn timeline_per_event_and_overall() {
    let (_, dashboard) = dashboard();

    let overall = dashboard.timeline(None).await.unwrap();
    assert_eq!(overall.len(), 3);
    assert!(overall.windows(2).all(|w| w[0].date < w[1].date));

    let gala = dashboard.timeline(Some(&EntityId::from("2"))).await.unwrap();
    assert_eq!(gala.iter().map(|p| p.count).collect::<Vec<_>>(), [2, 1]);
}

#[tokio::test]
async fn recent_events_are_newest_first() {
    let (_, dashboard) = dashboard();
    let events = dashboard.recent_events(1).await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].title, "Winter Gala");
}

#[tokio::test]
async fn fetch_failures_are_reported() {
    let (backend, dashboard) = dashboard();
    backend.fail("Media", "timeout");

    let err = dashboard.summary(Utc::now()).await.unwrap_err();
    assert!(matches!(err, DashboardError::Entity { .. }));
    assert!(err.to_string().contains("listing media"));
}

#[tokio::test]
async fn sparse_rsvps_still_count() {
    let (backend, dashboard) = dashboard();
    backend.seed(
        "RSVP",
        [json!({"id": "e", "event_id": 1, "guest_name": "Eve", "status": "attending", "guest_count": null, "guest_email": null})],
    );

    let stats = dashboard.event_stats(&EntityId::from(1_u64)).await.unwrap();
    assert_eq!((stats.total, stats.attending), (2, 2));
    assert_eq!(stats.headcount, 3);
}
