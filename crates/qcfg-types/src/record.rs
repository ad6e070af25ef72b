//! The record contract and field enumeration.
//!
//! Enumeration serializes the record into a `serde_json::Value` once and
//! walks its top-level map. `serde_json` is built with `preserve_order`, so
//! fields come back in the order serde emits them, which for derived structs
//! is declaration order.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{TypeError, TypeResult};
use crate::field::{Field, FieldKind, Fields};

/// Name of the one field every record must expose.
pub const VERSION_FIELD: &str = "Version";

/// Values qcfg can persist, load, and diff.
///
/// Implemented for every serde round-trippable type. Whether a particular
/// value satisfies the `Version` contract is checked at runtime by
/// [`check_record`].
pub trait Record: Serialize + DeserializeOwned + Send + Sync {}

impl<T> Record for T where T: Serialize + DeserializeOwned + Send + Sync {}

/// Enumerate the top-level fields of a record.
pub fn fields<T: Serialize + ?Sized>(record: &T) -> TypeResult<Fields> {
    let value =
        serde_json::to_value(record).map_err(|e| TypeError::Serialization(e.to_string()))?;
    match value {
        Value::Object(map) => Ok(Fields::new(
            map.into_iter()
                .map(|(name, value)| Field::new(name, value))
                .collect(),
        )),
        other => Err(TypeError::NotStructured {
            type_name: short_type_name::<T>(),
            kind: FieldKind::of(&other),
        }),
    }
}

/// Check that a record is structured and has a text `Version` field.
pub fn check_record<T: Serialize + ?Sized>(record: &T) -> TypeResult<()> {
    record_version(record).map(|_| ())
}

/// Read the `Version` field of a record.
pub fn record_version<T: Serialize + ?Sized>(record: &T) -> TypeResult<String> {
    let fields = fields(record)?;
    let field = fields
        .get(VERSION_FIELD)
        .ok_or_else(|| TypeError::MissingVersion {
            type_name: short_type_name::<T>(),
        })?;
    match &field.value {
        Value::String(version) => Ok(version.clone()),
        other => Err(TypeError::VersionNotText {
            type_name: short_type_name::<T>(),
            kind: FieldKind::of(other),
        }),
    }
}

/// `my_crate::module::Settings<u8>` becomes `Settings`.
fn short_type_name<T: ?Sized>() -> String {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base).to_string()
}
