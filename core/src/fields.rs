//! Shape guards over the options map.
//!
//! The client never reads an option directly; it asks these predicates first
//! and only attaches query, headers, or body when they confirm a non-null
//! value of the expected shape.

use serde_json::{Map, Value};

/// True when `o[key]` exists and is a non-empty string.
pub fn has_non_null_string_field(key: &str, o: Option<&Map<String, Value>>) -> bool {
    match o.and_then(|o| o.get(key)) {
        Some(Value::String(s)) => !s.is_empty(),
        _ => false,
    }
}

/// True when `o[key]` exists and is an object or an array. Null does not
/// count as an object here.
pub fn has_non_null_object_field(key: &str, o: Option<&Map<String, Value>>) -> bool {
    matches!(
        o.and_then(|o| o.get(key)),
        Some(Value::Object(_) | Value::Array(_))
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn string_field_false_without_map() {
        assert!(!has_non_null_string_field("abc", None));
    }

    #[test]
    fn string_field_false_when_key_missing() {
        let o = map(json!({}));
        assert!(!has_non_null_string_field("abc", Some(&o)));
    }

    #[test]
    fn string_field_false_for_object_value() {
        let o = map(json!({ "abc": {} }));
        assert!(!has_non_null_string_field("abc", Some(&o)));
    }

    #[test]
    fn string_field_false_for_null_value() {
        let o = map(json!({ "abc": null }));
        assert!(!has_non_null_string_field("abc", Some(&o)));
    }

    #[test]
    fn string_field_false_for_empty_string() {
        let o = map(json!({ "abc": "" }));
        assert!(!has_non_null_string_field("abc", Some(&o)));
    }

    #[test]
    fn string_field_true_for_string_value() {
        let o = map(json!({ "abc": "def" }));
        assert!(has_non_null_string_field("abc", Some(&o)));
    }

    #[test]
    fn object_field_false_without_map() {
        assert!(!has_non_null_object_field("abc", None));
    }

    #[test]
    fn object_field_false_when_key_missing() {
        let o = map(json!({}));
        assert!(!has_non_null_object_field("abc", Some(&o)));
    }

    #[test]
    fn object_field_false_for_string_value() {
        let o = map(json!({ "abc": "def" }));
        assert!(!has_non_null_object_field("abc", Some(&o)));
    }

    #[test]
    fn object_field_false_for_null_value() {
        let o = map(json!({ "abc": null }));
        assert!(!has_non_null_object_field("abc", Some(&o)));
    }

    #[test]
    fn object_field_true_for_objects_and_arrays() {
        let o = map(json!({ "abc": {}, "list": [] }));
        assert!(has_non_null_object_field("abc", Some(&o)));
        assert!(has_non_null_object_field("list", Some(&o)));
    }
}
