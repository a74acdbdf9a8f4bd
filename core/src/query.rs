//! Query-string construction from a loosely typed options value.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_json::{Number, Value};

/// Bytes left unescaped by URI component encoding.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode `input` with URI component rules (space becomes `%20`).
pub fn encode_uri_component(input: &str) -> String {
    utf8_percent_encode(input, URI_COMPONENT).to_string()
}

/// True only for strings, numbers, and booleans.
pub fn value_is_encodable(value: &Value) -> bool {
    matches!(value, Value::String(_) | Value::Number(_) | Value::Bool(_))
}

/// Build `?k1=v1&k2=v2` from the entries of an object, in insertion order.
///
/// Anything that is not an object yields an empty string. Values that are
/// not encodable are written as an empty string after `=`.
pub fn create_query_string(o: Option<&Value>) -> String {
    let Some(Value::Object(entries)) = o else {
        return String::new();
    };

    let mut query_string = String::new();
    let mut join = '?';
    for (key, value) in entries {
        query_string.push(join);
        query_string.push_str(&encode_uri_component(key));
        query_string.push('=');
        if let Some(text) = encodable_text(value) {
            query_string.push_str(&encode_uri_component(&text));
        }
        join = '&';
    }
    query_string
}

pub(crate) fn encodable_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(number_text(n)),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn number_text(n: &Number) -> String {
    if n.is_f64() {
        // f64 Display drops a zero fraction: 1.0 prints as "1".
        n.as_f64().map(|f| f.to_string()).unwrap_or_default()
    } else {
        n.to_string()
    }
}
