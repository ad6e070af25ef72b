//! Foundation types for qcfg.
//!
//! A *record* is any caller-defined value that serde can serialize into a
//! structured map of named fields. qcfg never imposes a schema on records,
//! with one exception: every record must carry a text field literally named
//! `Version`. This crate implements that contract once, along with the field
//! enumeration that the differ and the version checks rely on.
//!
//! # Key Types
//!
//! - [`Record`] -- blanket trait for values qcfg can persist
//! - [`Field`] / [`FieldKind`] -- a reflected `(name, value, kind)` triple
//! - [`Fields`] -- all fields of a record in declaration order
//!
//! # Entry Points
//!
//! - [`fields`] -- enumerate the fields of a record
//! - [`check_record`] -- enforce the `Version` contract
//! - [`record_version`] -- read the `Version` field

pub mod error;
pub mod field;
pub mod record;

pub use error::{TypeError, TypeResult};
pub use field::{Field, FieldKind, Fields};
pub use record::{check_record, fields, record_version, Record, VERSION_FIELD};
