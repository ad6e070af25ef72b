use thiserror::Error;

use crate::field::FieldKind;

/// Errors produced while inspecting a record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    /// The record does not serialize to a structured value.
    #[error("record '{type_name}' must be a struct, found {kind}")]
    NotStructured { type_name: String, kind: FieldKind },

    /// The record has no field named `Version`.
    #[error("struct '{type_name}' must have field 'Version'")]
    MissingVersion { type_name: String },

    /// The `Version` field exists but is not text.
    #[error("'Version' field in struct '{type_name}' must be a string type, found {kind}")]
    VersionNotText { type_name: String, kind: FieldKind },

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result alias for record inspection.
pub type TypeResult<T> = Result<T, TypeError>;
