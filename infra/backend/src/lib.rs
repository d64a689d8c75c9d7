//! # Backend
//!
//! Every EventHub record lives in a hosted backend-as-a-service. This crate is the only place
//! that talks to it: the [`Backend`] trait describes the entity and account calls the rest of
//! the workspace needs, over untyped JSON records.
//!
//! * [`HttpBackend`]: the production client (`reqwest`), built from [`BackendConfig`].
//! * [`MemoryBackend`]: a seeded in-process store with a call journal, used as the test double.
//!
//! Typing of records happens one layer up, in the entity façade.
//!
//! ## Example
//!
//! ```rust
//! use evhub_backend::{Backend, BackendError, Filter, ListQuery, MemoryBackend};
//! use serde_json::json;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), BackendError> {
//!     let backend = MemoryBackend::new();
//!     backend.seed("Package", [json!({"id": 1, "slug": "pro", "package_name": "Pro"})]);
//!
//!     let found = backend.filter("Package", &Filter::new().field("slug", "pro"), &ListQuery::new()).await?;
//!     assert_eq!(found[0]["package_name"], "Pro");
//!     Ok(())
//! }
//! ```
//!
//! [`BackendConfig`]: evhub_domain::config::BackendConfig

mod error;
mod http;
mod memory;
mod query;

pub use crate::error::{BackendError, BackendErrorExt};
pub use crate::http::{HttpBackend, HttpBackendBuilder};
pub use crate::memory::{Call, MemoryBackend};
pub use crate::query::{Filter, ListQuery, SortKey, loosely_equal};

use async_trait::async_trait;
use serde_json::Value;
use std::fmt::Debug;
use std::sync::Arc;

/// Entity and account calls of the hosted backend.
///
/// `entity` is the backend's entity name (`"Event"`, `"Package"`, ...). Records are JSON
/// objects carrying an `id` assigned by the backend.
#[async_trait]
pub trait Backend: Send + Sync + Debug {
    async fn list(&self, entity: &str, query: &ListQuery) -> Result<Vec<Value>, BackendError>;

    /// Records whose fields equal every condition of `filter`.
    async fn filter(
        &self,
        entity: &str,
        filter: &Filter,
        query: &ListQuery,
    ) -> Result<Vec<Value>, BackendError>;

    /// `Ok(None)` when the backend reports the record as missing.
    async fn get(&self, entity: &str, id: &str) -> Result<Option<Value>, BackendError>;

    /// Returns the stored record, including its assigned `id`.
    async fn create(&self, entity: &str, record: Value) -> Result<Value, BackendError>;

    /// Applies a partial update and returns the stored record.
    async fn update(&self, entity: &str, id: &str, patch: Value) -> Result<Value, BackendError>;

    async fn delete(&self, entity: &str, id: &str) -> Result<(), BackendError>;

    /// The signed-in user.
    async fn me(&self) -> Result<Value, BackendError>;

    async fn update_me(&self, patch: Value) -> Result<Value, BackendError>;

    async fn change_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), BackendError>;
}

/// Shared handle used by the façade and services.
pub type SharedBackend = Arc<dyn Backend>;
