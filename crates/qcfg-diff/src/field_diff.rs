//! Field-level diff between two records.

use serde::{Deserialize, Serialize};

use qcfg_types::{fields, Field, Fields};

use crate::error::DiffResult;

/// Which comparison to run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffMode {
    /// Compare field names.
    #[default]
    Presence,
    /// Compare field values across all fields.
    Deep,
}

impl DiffMode {
    pub fn apply(&self, a: &Fields, b: &Fields) -> Vec<Field> {
        match self {
            Self::Presence => diff_fields(a, b),
            Self::Deep => deep_diff_fields(a, b),
        }
    }
}

/// Fields of `a` whose name matches no field name of `b`.
pub fn diff_fields(a: &Fields, b: &Fields) -> Vec<Field> {
    a.iter()
        .filter(|field| !b.contains_name(&field.name))
        .cloned()
        .collect()
}

/// Fields of `a` whose value equals no field value of `b`.
///
/// Equality is recursive over nested maps and sequences. Any field of `b`
/// can satisfy the match, regardless of its name.
pub fn deep_diff_fields(a: &Fields, b: &Fields) -> Vec<Field> {
    a.iter()
        .filter(|field| !b.contains_value(&field.value))
        .cloned()
        .collect()
}

/// Presence diff of two records.
pub fn diff<A, B>(a: &A, b: &B) -> DiffResult<Vec<Field>>
where
    A: Serialize + ?Sized,
    B: Serialize + ?Sized,
{
    Ok(diff_fields(&fields(a)?, &fields(b)?))
}

/// Deep diff of two records.
pub fn deep_diff<A, B>(a: &A, b: &B) -> DiffResult<Vec<Field>>
where
    A: Serialize + ?Sized,
    B: Serialize + ?Sized,
{
    Ok(deep_diff_fields(&fields(a)?, &fields(b)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DiffError;
    use serde_json::json;

    #[derive(Serialize)]
    #[serde(rename_all = "PascalCase")]
    struct Full {
        version: String,
        name: String,
        extra: String,
    }

    #[derive(Serialize)]
    #[serde(rename_all = "PascalCase")]
    struct Slim {
        version: String,
        name: String,
    }

    fn full() -> Full {
        Full {
            version: "1".into(),
            name: "x".into(),
            extra: "y".into(),
        }
    }

    fn slim() -> Slim {
        Slim {
            version: "1".into(),
            name: "x".into(),
        }
    }

    #[test]
    fn presence_diff_reports_removed_field() {
        let result = diff(&full(), &slim()).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Extra");
        assert_eq!(result[0].value, json!("y"));
    }

    #[test]
    fn presence_diff_is_one_directional() {
        assert!(diff(&slim(), &full()).unwrap().is_empty());
    }

    #[test]
    fn presence_diff_ignores_values() {
        let a = json!({"Version": "1", "Name": "x"});
        let b = json!({"Version": "9", "Name": "changed"});
        assert!(diff(&a, &b).unwrap().is_empty());
    }

    #[test]
    fn deep_diff_reports_changed_value() {
        let a = json!({"Version": "1", "X": "a"});
        let b = json!({"Version": "1", "X": "b"});
        let result = deep_diff(&a, &b).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "X");
        assert_eq!(result[0].value, json!("a"));
    }

    #[test]
    fn deep_diff_matches_values_across_names() {
        let a = json!({"Version": "1", "X": "a"});
        let b = json!({"Version": "1", "Y": "a"});
        assert!(deep_diff(&a, &b).unwrap().is_empty());
    }

    #[test]
    fn deep_diff_compares_nested_values_recursively() {
        let a = json!({"Version": "1", "Tls": {"Cert": "a.pem", "Peers": [1, 2]}});
        let same = json!({"Version": "1", "Tls": {"Cert": "a.pem", "Peers": [1, 2]}});
        let changed = json!({"Version": "1", "Tls": {"Cert": "a.pem", "Peers": [2, 1]}});

        assert!(deep_diff(&a, &same).unwrap().is_empty());
        let result = deep_diff(&a, &changed).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Tls");
    }

    #[test]
    fn results_follow_left_declaration_order() {
        let a = json!({"Version": "1", "C": 3, "A": 1, "B": 2});
        let b = json!({"Version": "1"});
        let names: Vec<String> = diff(&a, &b).unwrap().into_iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
    }

    #[test]
    fn mode_dispatch() {
        let a = fields(&json!({"Version": "1", "X": "a"})).unwrap();
        let b = fields(&json!({"Version": "1", "Y": "a"})).unwrap();
        assert_eq!(DiffMode::Presence.apply(&a, &b).len(), 1);
        assert!(DiffMode::Deep.apply(&a, &b).is_empty());
    }

    #[test]
    fn primitive_side_is_an_error() {
        let err = diff(&json!({"Version": "1"}), &5u8).unwrap_err();
        assert!(matches!(err, DiffError::Fields(_)));
    }
}
