use crate::error::BackendError;
use crate::query::{Filter, ListQuery, loosely_equal};
use crate::Backend;
use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use fxhash::FxHashMap;
use parking_lot::{Mutex, RwLock};
use serde_json::{Map, Value};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::trace;

const USER: &str = "User";

/// One request observed by a [`MemoryBackend`], in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List { entity: String, query: ListQuery },
    Filter { entity: String, filter: Filter, query: ListQuery },
    Get { entity: String, id: String },
    Create { entity: String },
    Update { entity: String, id: String },
    Delete { entity: String, id: String },
    Me,
    UpdateMe,
    ChangePassword,
}

impl Call {
    /// Entity touched by the call, `None` for account calls.
    #[must_use]
    pub fn entity(&self) -> Option<&str> {
        match self {
            Self::List { entity, .. }
            | Self::Filter { entity, .. }
            | Self::Get { entity, .. }
            | Self::Create { entity }
            | Self::Update { entity, .. }
            | Self::Delete { entity, .. } => Some(entity),
            Self::Me | Self::UpdateMe | Self::ChangePassword => None,
        }
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    collections: RwLock<FxHashMap<String, Vec<Value>>>,
    failures: RwLock<FxHashMap<String, String>>,
    current_user: RwLock<Option<Value>>,
    password: RwLock<Option<String>>,
    journal: Mutex<Vec<Call>>,
    next_id: AtomicU64,
}

/// In-process [`Backend`] over seeded JSON collections.
///
/// Cloning shares the underlying state. Failures can be injected per entity (or for the
/// account calls via `"User"`) to exercise error paths.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    state: Arc<MemoryState>,
}

impl MemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends records to an entity collection.
    pub fn seed(&self, entity: &str, records: impl IntoIterator<Item = Value>) {
        self.state.collections.write().entry(entity.to_owned()).or_default().extend(records);
    }

    /// Sets the signed-in user, also stored in the `User` collection.
    pub fn sign_in(&self, user: Value) {
        let user = self.with_id(user);
        self.upsert(USER, user.clone());
        *self.state.current_user.write() = Some(user);
    }

    pub fn set_password(&self, password: impl Into<String>) {
        *self.state.password.write() = Some(password.into());
    }

    /// Makes every call on `entity` fail with a `503` until [`MemoryBackend::recover`].
    pub fn fail(&self, entity: &str, message: impl Into<String>) {
        self.state.failures.write().insert(entity.to_owned(), message.into());
    }

    pub fn recover(&self, entity: &str) {
        self.state.failures.write().remove(entity);
    }

    /// Current contents of a collection.
    #[must_use]
    pub fn records(&self, entity: &str) -> Vec<Value> {
        self.state.collections.read().get(entity).cloned().unwrap_or_default()
    }

    /// Calls received so far.
    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.state.journal.lock().clone()
    }

    pub fn clear_calls(&self) {
        self.state.journal.lock().clear();
    }

    fn record(&self, call: Call) -> Result<(), BackendError> {
        let entity = call.entity().unwrap_or(USER).to_owned();
        trace!(?call, "memory backend call");
        self.state.journal.lock().push(call);

        match self.state.failures.read().get(&entity) {
            Some(message) => Err(BackendError::Status {
                status: 503,
                message: message.clone().into(),
                context: Some(entity.into()),
            }),
            None => Ok(()),
        }
    }

    fn with_id(&self, mut record: Value) -> Value {
        if let Value::Object(map) = &mut record {
            if !map.contains_key("id") {
                let id = self.state.next_id.fetch_add(1, Ordering::Relaxed) + 1;
                map.insert("id".to_owned(), Value::String(format!("mem-{id}")));
            }
            map.entry("created_date")
                .or_insert_with(|| Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)));
        }
        record
    }

    fn upsert(&self, entity: &str, record: Value) {
        let mut collections = self.state.collections.write();
        let collection = collections.entry(entity.to_owned()).or_default();
        let id = record.get("id").cloned().unwrap_or(Value::Null);
        match collection.iter_mut().find(|r| r.get("id").is_some_and(|v| loosely_equal(v, &id))) {
            Some(existing) => *existing = record,
            None => collection.push(record),
        }
    }

    fn find(&self, entity: &str, id: &str) -> Option<Value> {
        let id = Value::String(id.to_owned());
        self.state
            .collections
            .read()
            .get(entity)?
            .iter()
            .find(|r| r.get("id").is_some_and(|v| loosely_equal(v, &id)))
            .cloned()
    }

    fn current_user(&self) -> Result<Value, BackendError> {
        self.state.current_user.read().clone().ok_or_else(|| BackendError::Status {
            status: 401,
            message: "not signed in".into(),
            context: None,
        })
    }
}

fn merge(target: &mut Value, patch: Value) -> Result<(), BackendError> {
    let (Value::Object(target), Value::Object(patch)) = (target, patch) else {
        return Err(BackendError::Validation {
            message: "records and patches must be JSON objects".into(),
            context: None,
        });
    };
    for (key, value) in patch {
        if key != "id" {
            target.insert(key, value);
        }
    }
    Ok(())
}

fn not_found(entity: &str, id: &str) -> BackendError {
    BackendError::NotFound { message: format!("{entity} {id}").into(), context: None }
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn list(&self, entity: &str, query: &ListQuery) -> Result<Vec<Value>, BackendError> {
        self.record(Call::List { entity: entity.to_owned(), query: query.clone() })?;
        Ok(query.apply(self.records(entity)))
    }

    async fn filter(
        &self,
        entity: &str,
        filter: &Filter,
        query: &ListQuery,
    ) -> Result<Vec<Value>, BackendError> {
        self.record(Call::Filter {
            entity: entity.to_owned(),
            filter: filter.clone(),
            query: query.clone(),
        })?;
        let matching = self.records(entity).into_iter().filter(|r| filter.matches(r)).collect();
        Ok(query.apply(matching))
    }

    async fn get(&self, entity: &str, id: &str) -> Result<Option<Value>, BackendError> {
        self.record(Call::Get { entity: entity.to_owned(), id: id.to_owned() })?;
        Ok(self.find(entity, id))
    }

    async fn create(&self, entity: &str, record: Value) -> Result<Value, BackendError> {
        self.record(Call::Create { entity: entity.to_owned() })?;
        if !record.is_object() {
            return Err(BackendError::Validation {
                message: format!("{entity} records must be JSON objects").into(),
                context: None,
            });
        }
        let record = self.with_id(record);
        self.upsert(entity, record.clone());
        Ok(record)
    }

    async fn update(&self, entity: &str, id: &str, patch: Value) -> Result<Value, BackendError> {
        self.record(Call::Update { entity: entity.to_owned(), id: id.to_owned() })?;
        let mut record = self.find(entity, id).ok_or_else(|| not_found(entity, id))?;
        merge(&mut record, patch)?;
        self.upsert(entity, record.clone());
        Ok(record)
    }

    async fn delete(&self, entity: &str, id: &str) -> Result<(), BackendError> {
        self.record(Call::Delete { entity: entity.to_owned(), id: id.to_owned() })?;
        let key = Value::String(id.to_owned());
        let mut collections = self.state.collections.write();
        let collection = collections.get_mut(entity).ok_or_else(|| not_found(entity, id))?;
        let before = collection.len();
        collection.retain(|r| !r.get("id").is_some_and(|v| loosely_equal(v, &key)));
        if collection.len() == before {
            return Err(not_found(entity, id));
        }
        Ok(())
    }

    async fn me(&self) -> Result<Value, BackendError> {
        self.record(Call::Me)?;
        self.current_user()
    }

    async fn update_me(&self, patch: Value) -> Result<Value, BackendError> {
        self.record(Call::UpdateMe)?;
        let mut user = self.current_user()?;
        merge(&mut user, patch)?;
        self.upsert(USER, user.clone());
        *self.state.current_user.write() = Some(user.clone());
        Ok(user)
    }

    async fn change_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), BackendError> {
        self.record(Call::ChangePassword)?;
        self.current_user()?;
        let mut password = self.state.password.write();
        if password.as_deref().is_some_and(|stored| stored != current_password) {
            return Err(BackendError::Status {
                status: 400,
                message: "current password is incorrect".into(),
                context: None,
            });
        }
        *password = Some(new_password.to_owned());
        Ok(())
    }
}

impl From<Map<String, Value>> for MemoryBackend {
    /// Builds a store from `{ "Entity": [records...] }`.
    fn from(collections: Map<String, Value>) -> Self {
        let backend = Self::new();
        for (entity, records) in collections {
            if let Value::Array(records) = records {
                backend.seed(&entity, records);
            }
        }
        backend
    }
}
