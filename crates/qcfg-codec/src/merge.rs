//! Document merge used by decoding.

use serde_json::Value;

/// Merge `overlay` into `base`.
///
/// Maps are merged key by key, recursing into nested maps. Any other overlay
/// value, sequences included, replaces the base value outright.
pub fn merge_values(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(slot) => merge_values(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, overlay) => *slot = overlay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_keys_are_preserved() {
        let mut base = json!({"Version": "1", "Name": "a", "Port": 80});
        merge_values(&mut base, json!({"Name": "b"}));
        assert_eq!(base, json!({"Version": "1", "Name": "b", "Port": 80}));
    }

    #[test]
    fn nested_maps_merge_recursively() {
        let mut base = json!({"Tls": {"Cert": "a.pem", "Key": "a.key"}});
        merge_values(&mut base, json!({"Tls": {"Cert": "b.pem"}}));
        assert_eq!(base, json!({"Tls": {"Cert": "b.pem", "Key": "a.key"}}));
    }

    #[test]
    fn sequences_are_replaced() {
        let mut base = json!({"Peers": ["a", "b", "c"]});
        merge_values(&mut base, json!({"Peers": ["z"]}));
        assert_eq!(base, json!({"Peers": ["z"]}));
    }

    #[test]
    fn new_keys_are_added() {
        let mut base = json!({"Version": "1"});
        merge_values(&mut base, json!({"Extra": true}));
        assert_eq!(base, json!({"Version": "1", "Extra": true}));
    }

    #[test]
    fn scalar_overlay_replaces_map() {
        let mut base = json!({"Version": "1"});
        merge_values(&mut base, json!(5));
        assert_eq!(base, json!(5));
    }
}
