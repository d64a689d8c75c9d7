use crate::error::{EntityError, EntityErrorExt};
use evhub_backend::{Filter, ListQuery, SharedBackend};
use evhub_domain::{Entity, Package};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;
use tracing::debug;

/// Typed access to one entity collection.
pub struct EntityHandle<T> {
    backend: SharedBackend,
    marker: PhantomData<fn() -> T>,
}

impl<T> Clone for EntityHandle<T> {
    fn clone(&self) -> Self {
        Self { backend: SharedBackend::clone(&self.backend), marker: PhantomData }
    }
}

impl<T: Entity> fmt::Debug for EntityHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityHandle").field("entity", &T::NAME).finish_non_exhaustive()
    }
}

impl<T: Entity> EntityHandle<T> {
    pub(crate) fn new(backend: SharedBackend) -> Self {
        Self { backend, marker: PhantomData }
    }

    pub async fn list(&self, query: &ListQuery) -> Result<Vec<T>, EntityError> {
        let records = self.backend.list(T::NAME, query).await.context(T::NAME)?;
        decode_all(records)
    }

    /// Records whose fields equal every condition of `filter`.
    pub async fn filter(&self, filter: &Filter, query: &ListQuery) -> Result<Vec<T>, EntityError> {
        let records = self.backend.filter(T::NAME, filter, query).await.context(T::NAME)?;
        decode_all(records)
    }

    pub async fn get(&self, id: impl AsRef<str>) -> Result<Option<T>, EntityError> {
        let id = id.as_ref();
        match self.backend.get(T::NAME, id).await.context(T::NAME)? {
            Some(record) => decode(record).map(Some),
            None => {
                debug!(entity = T::NAME, id, "Record not found");
                Ok(None)
            },
        }
    }

    /// Stores `record` and returns it as the backend saved it (with its id).
    pub async fn create(&self, record: &T) -> Result<T, EntityError> {
        let body = encode(record, T::NAME)?;
        decode(self.backend.create(T::NAME, body).await.context(T::NAME)?)
    }

    /// Partial update; `patch` serializes to the fields being changed.
    pub async fn update(
        &self,
        id: impl AsRef<str>,
        patch: &(impl Serialize + Sync),
    ) -> Result<T, EntityError> {
        let body = encode(patch, T::NAME)?;
        decode(self.backend.update(T::NAME, id.as_ref(), body).await.context(T::NAME)?)
    }

    pub async fn delete(&self, id: impl AsRef<str>) -> Result<(), EntityError> {
        self.backend.delete(T::NAME, id.as_ref()).await.context(T::NAME)?;
        Ok(())
    }
}

impl EntityHandle<Package> {
    /// First package whose `slug` matches.
    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Package>, EntityError> {
        let filter = Filter::new().field("slug", slug);
        let mut found = self.filter(&filter, &ListQuery::new().limit(1)).await?;
        Ok(if found.is_empty() { None } else { Some(found.swap_remove(0)) })
    }
}

pub(crate) fn decode<T: DeserializeOwned>(record: Value) -> Result<T, EntityError> {
    serde_json::from_value(record).context(std::any::type_name::<T>())
}

fn decode_all<T: DeserializeOwned>(records: Vec<Value>) -> Result<Vec<T>, EntityError> {
    records.into_iter().map(decode).collect()
}

pub(crate) fn encode(value: &impl Serialize, entity: &'static str) -> Result<Value, EntityError> {
    serde_json::to_value(value).context(format!("encoding {entity}"))
}
