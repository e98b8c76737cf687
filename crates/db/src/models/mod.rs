//! Row structs and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` row struct and the
//! `Deserialize` create / update DTOs for that table. Update DTOs carry
//! only `Option` fields; `None` leaves the column unchanged. Nullable
//! columns use `Option<Option<T>>` so that an explicit `null` clears them.

use serde::{Deserialize, Deserializer};

pub mod account;
pub mod catalog;
pub mod employee;
pub mod opportunity;

/// Deserialize a present field as `Some(value)`, with `null` as `Some(None)`.
///
/// Pair with `#[serde(default)]` so an absent field stays `None`.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
