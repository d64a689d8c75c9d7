//! # Entities
//!
//! Typed façade over the [`Backend`] boundary. Each accessor returns an [`EntityHandle`]
//! bound to one backend entity; records are decoded into the domain structs, and a record
//! that does not fit surfaces as [`EntityError::Decode`]. Nothing is cached: every call is a
//! fresh backend request.
//!
//! ```rust
//! use evhub_backend::{ListQuery, MemoryBackend};
//! use evhub_entities::Entities;
//! use serde_json::json;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), evhub_entities::EntityError> {
//! let backend = MemoryBackend::new();
//! backend.seed("Event", [json!({"id": 1, "title": "Launch party"})]);
//!
//! let entities = Entities::new(backend);
//! let events = entities.events().list(&ListQuery::new()).await?;
//! assert_eq!(events[0].title, "Launch party");
//! # Ok(())
//! # }
//! ```
//!
//! [`Backend`]: evhub_backend::Backend

mod auth;
mod error;
mod handle;

pub use crate::auth::Auth;
pub use crate::error::{EntityError, EntityErrorExt};
pub use crate::handle::EntityHandle;

use evhub_backend::{Backend, SharedBackend};
use evhub_domain::{
    Entity, Event, Feature, Media, Package, PackageFeature, Rsvp, SystemSettings, User,
};
use std::sync::Arc;

/// Entry point handing out typed handles; cheap to clone.
#[derive(Debug, Clone)]
pub struct Entities {
    backend: SharedBackend,
}

impl Entities {
    pub fn new(backend: impl Backend + 'static) -> Self {
        Self { backend: Arc::new(backend) }
    }

    #[must_use]
    pub const fn from_shared(backend: SharedBackend) -> Self {
        Self { backend }
    }

    /// Handle for any entity type, including ones without a named accessor.
    #[must_use]
    pub fn handle<T: Entity>(&self) -> EntityHandle<T> {
        EntityHandle::new(Arc::clone(&self.backend))
    }

    #[must_use]
    pub fn events(&self) -> EntityHandle<Event> {
        self.handle()
    }

    #[must_use]
    pub fn rsvps(&self) -> EntityHandle<Rsvp> {
        self.handle()
    }

    #[must_use]
    pub fn media(&self) -> EntityHandle<Media> {
        self.handle()
    }

    #[must_use]
    pub fn system_settings(&self) -> EntityHandle<SystemSettings> {
        self.handle()
    }

    #[must_use]
    pub fn features(&self) -> EntityHandle<Feature> {
        self.handle()
    }

    #[must_use]
    pub fn packages(&self) -> EntityHandle<Package> {
        self.handle()
    }

    #[must_use]
    pub fn package_features(&self) -> EntityHandle<PackageFeature> {
        self.handle()
    }

    /// User records by id. The signed-in user goes through [`Entities::auth`].
    #[must_use]
    pub fn users(&self) -> EntityHandle<User> {
        self.handle()
    }

    #[must_use]
    pub fn auth(&self) -> Auth {
        Auth::new(Arc::clone(&self.backend))
    }
}
