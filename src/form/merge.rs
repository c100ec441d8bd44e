//! Recursive merge of key/value trees

use serde_json::{Map, Value};

/// Merge `overlay` over `base`, returning a new tree
///
/// Objects merge key by key, recursing when both sides hold an object;
/// any other overlay value replaces the base value. Keys keep the order in
/// which they first appear.
pub fn deep_merge(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => {
            let mut merged = base.clone();
            merge_into(&mut merged, overlay);
            Value::Object(merged)
        }
        (_, overlay) => overlay.clone(),
    }
}

/// In-place variant of [`deep_merge`] for attribute maps
pub fn merge_into(base: &mut Map<String, Value>, overlay: &Map<String, Value>) {
    for (key, value) in overlay {
        let merged = match (base.get(key), value) {
            (Some(existing @ Value::Object(_)), Value::Object(_)) => deep_merge(existing, value),
            _ => value.clone(),
        };
        base.insert(key.clone(), merged);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_overlay_wins_on_scalars() {
        let merged = deep_merge(&json!({"type": "text", "size": 10}), &json!({"type": "color"}));
        assert_eq!(merged, json!({"type": "color", "size": 10}));
    }

    #[test]
    fn test_nested_maps_merge_key_by_key() {
        let base = json!({"data": {"a": 1, "b": {"x": 1}}, "class": "field"});
        let overlay = json!({"data": {"b": {"y": 2}, "c": 3}});
        let merged = deep_merge(&base, &overlay);
        assert_eq!(
            merged,
            json!({"data": {"a": 1, "b": {"x": 1, "y": 2}, "c": 3}, "class": "field"})
        );
    }

    #[test]
    fn test_scalar_replaces_map_and_back() {
        assert_eq!(deep_merge(&json!({"a": {"b": 1}}), &json!({"a": 2})), json!({"a": 2}));
        assert_eq!(deep_merge(&json!({"a": 2}), &json!({"a": {"b": 1}})), json!({"a": {"b": 1}}));
        assert_eq!(deep_merge(&json!("x"), &json!({"a": 1})), json!({"a": 1}));
    }

    #[test]
    fn test_key_order_is_preserved() {
        let merged = deep_merge(&json!({"b": 1, "a": 2}), &json!({"c": 3, "b": 4}));
        let keys: Vec<_> = merged.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }
}
