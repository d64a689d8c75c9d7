//! # Domain Models
//!
//! This crate contains pure domain types with minimal dependencies (`serde`, `serde_json`).
//! Keep it lean: no I/O, networking, or heavy logic, just data and simple helpers.
//!
//! Entity shapes mirror the JSON records stored by the hosted backend, so field names stay
//! snake_case and unknown fields are carried along in `extra`.

pub mod config;
pub mod constants;
pub mod entity;
pub mod event;
pub mod feature;
pub mod id;
pub mod media;
mod nullable;
pub mod package;
pub mod plan;
pub mod rsvp;
pub mod settings;
pub mod user;

pub use entity::Entity;
pub use event::Event;
pub use feature::{Feature, FeatureType};
pub use id::EntityId;
pub use media::{Media, MediaType};
pub use package::{Package, PackageFeature};
pub use plan::{FeatureValue, Limit, LimitCheck, ResolvedPlan};
pub use rsvp::{Rsvp, RsvpStatus};
pub use settings::SystemSettings;
pub use user::User;
