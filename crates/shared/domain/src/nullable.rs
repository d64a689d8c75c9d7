//! Field deserializers for records where the backend writes `null` for unset values.
//!
//! `#[serde(default)]` only covers a missing key; pair it with one of these to treat an
//! explicit `null` the same way.

use serde::{Deserialize, Deserializer};

/// `null` reads as `T::default()`.
pub(crate) fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// `null` reads as a party of one.
pub(crate) fn guest_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    Option::<u32>::deserialize(deserializer).map(|count| count.unwrap_or(1))
}
