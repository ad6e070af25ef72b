use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Coarse shape of a field value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    Null,
    Bool,
    Int,
    Uint,
    Float,
    String,
    Sequence,
    Map,
}

impl FieldKind {
    /// Classify a serialized value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(n) if n.is_u64() => Self::Uint,
            Value::Number(n) if n.is_i64() => Self::Int,
            Value::Number(_) => Self::Float,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Sequence,
            Value::Object(_) => Self::Map,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Uint => "uint",
            Self::Float => "float",
            Self::String => "string",
            Self::Sequence => "sequence",
            Self::Map => "map",
        };
        f.write_str(name)
    }
}

/// A single reflected field of a record.
///
/// Produced by [`crate::fields`]; never persisted on its own.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub value: Value,
    pub kind: FieldKind,
}

impl Field {
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        let kind = FieldKind::of(&value);
        Self {
            name: name.into(),
            value,
            kind,
        }
    }
}

/// All top-level fields of one record, in declaration order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Fields {
    entries: Vec<Field>,
}

impl Fields {
    pub fn new(entries: Vec<Field>) -> Self {
        Self { entries }
    }

    /// Look up a field by exact name.
    pub fn get(&self, name: &str) -> Option<&Field> {
        self.entries.iter().find(|f| f.name == name)
    }

    /// Returns `true` if any field has the given name.
    pub fn contains_name(&self, name: &str) -> bool {
        self.entries.iter().any(|f| f.name == name)
    }

    /// Returns `true` if any field, under any name, holds an equal value.
    pub fn contains_value(&self, value: &Value) -> bool {
        self.entries.iter().any(|f| &f.value == value)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Field> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn into_vec(self) -> Vec<Field> {
        self.entries
    }
}

impl IntoIterator for Fields {
    type Item = Field;
    type IntoIter = std::vec::IntoIter<Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Fields {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
