use crate::error::{DashboardError, DashboardErrorExt};
use crate::stats::EventStats;
use crate::summary::DashboardSummary;
use crate::timeline::{TimelinePoint, rsvp_timeline};
use chrono::{DateTime, Utc};
use evhub_backend::{Filter, ListQuery};
use evhub_domain::{EntityId, Event, Rsvp};
use evhub_entities::Entities;
use tracing::{debug, instrument};

/// Fetches fresh records through the entity façade and shapes them for the dashboard.
#[derive(Debug, Clone)]
pub struct Dashboard {
    entities: Entities,
}

impl Dashboard {
    #[must_use]
    pub const fn new(entities: Entities) -> Self {
        Self { entities }
    }

    /// Home page stat cards as of `now`.
    #[instrument(skip(self))]
    pub async fn summary(&self, now: DateTime<Utc>) -> Result<DashboardSummary, DashboardError> {
        let all = ListQuery::new();
        let events = self.entities.events().list(&all).await.context("listing events")?;
        let rsvps = self.entities.rsvps().list(&all).await.context("listing RSVPs")?;
        let media = self.entities.media().list(&all).await.context("listing media")?;
        debug!(events = events.len(), rsvps = rsvps.len(), media = media.len(), "Dashboard data fetched");
        Ok(DashboardSummary::build(&events, &rsvps, &media, now))
    }

    /// RSVP breakdown of a single event.
    #[instrument(skip(self))]
    pub async fn event_stats(&self, event_id: &EntityId) -> Result<EventStats, DashboardError> {
        Ok(EventStats::from_rsvps(&self.event_rsvps(event_id).await?))
    }

    /// RSVP activity chart, for one event or across all events.
    #[instrument(skip(self))]
    pub async fn timeline(
        &self,
        event_id: Option<&EntityId>,
    ) -> Result<Vec<TimelinePoint>, DashboardError> {
        let rsvps = match event_id {
            Some(id) => self.event_rsvps(id).await?,
            None => self.entities.rsvps().list(&ListQuery::new()).await.context("listing RSVPs")?,
        };
        Ok(rsvp_timeline(&rsvps))
    }

    /// Most recently created events first.
    pub async fn recent_events(&self, limit: usize) -> Result<Vec<Event>, DashboardError> {
        let query = ListQuery::new().sort("-created_date").limit(limit);
        self.entities.events().list(&query).await.context("listing events")
    }

    async fn event_rsvps(&self, event_id: &EntityId) -> Result<Vec<Rsvp>, DashboardError> {
        let filter = Filter::new().field("event_id", event_id.as_str());
        self.entities
            .rsvps()
            .filter(&filter, &ListQuery::new())
            .await
            .context(format!("listing RSVPs of event {event_id}"))
    }
}
