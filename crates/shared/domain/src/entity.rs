use crate::id::EntityId;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// A record type stored by the remote backend under a fixed entity name.
pub trait Entity: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Entity name as used in backend URLs (e.g. `"Event"`).
    const NAME: &'static str;

    /// The backend-assigned id, absent for records not created yet.
    fn id(&self) -> Option<&EntityId>;
}

/// Implements [`Entity`] for a struct with an `id: Option<EntityId>` field.
macro_rules! entity {
    ($ty:ty, $name:expr) => {
        impl $crate::entity::Entity for $ty {
            const NAME: &'static str = $name;

            fn id(&self) -> Option<&$crate::id::EntityId> {
                self.id.as_ref()
            }
        }
    };
}

pub(crate) use entity;
