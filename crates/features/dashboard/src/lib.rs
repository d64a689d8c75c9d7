//! # Dashboard
//!
//! Data behind the host dashboard: stat cards ([`DashboardSummary`]), per-event RSVP
//! breakdowns ([`EventStats`]) and the RSVP activity series ([`rsvp_timeline`]).
//! The aggregations are pure functions over fetched records; [`Dashboard`] does the fetching.

mod error;
mod service;
mod stats;
mod summary;
mod time;
mod timeline;

pub use crate::error::{DashboardError, DashboardErrorExt};
pub use crate::service::Dashboard;
pub use crate::stats::EventStats;
pub use crate::summary::DashboardSummary;
pub use crate::timeline::{TimelinePoint, rsvp_timeline};
