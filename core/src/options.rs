//! The per-call options bag.
//!
//! Every field is optional; which ones matter depends on the route. The
//! client reads them back through [`InvocationOptions::to_map`] and the
//! predicates in [`crate::fields`], so a field only takes effect when it
//! holds a non-null value of the expected shape.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ApiError, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

impl InvocationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read an options bag from a JSON object such as
    /// `{"query": {...}, "contentType": "json", "body": {...}}`.
    /// Unknown fields are ignored.
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| ApiError::InvalidRequest(e.to_string()))
    }

    pub fn with_query(mut self, query: Value) -> Self {
        self.query = Some(query);
        self
    }

    pub fn with_headers(mut self, headers: Value) -> Self {
        self.headers = Some(headers);
        self
    }

    /// Add one header, turning `headers` into an object if it is not one.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let headers = self
            .headers
            .get_or_insert_with(|| Value::Object(Map::new()));
        if !headers.is_object() {
            *headers = Value::Object(Map::new());
        }
        if let Value::Object(map) = headers {
            map.insert(name.into(), Value::String(value.into()));
        }
        self
    }

    pub fn with_content_type(mut self, token: impl Into<String>) -> Self {
        self.content_type = Some(token.into());
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// The options as a loosely typed map keyed `query`, `headers`,
    /// `contentType`, and `body`. Absent fields are absent keys.
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        if let Some(query) = &self.query {
            map.insert("query".to_string(), query.clone());
        }
        if let Some(headers) = &self.headers {
            map.insert("headers".to_string(), headers.clone());
        }
        if let Some(content_type) = &self.content_type {
            map.insert("contentType".to_string(), Value::String(content_type.clone()));
        }
        if let Some(body) = &self.body {
            map.insert("body".to_string(), body.clone());
        }
        map
    }
}

/// Serialize a typed value into the options value model.
pub fn to_option_value<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| ApiError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_options_map_is_empty() {
        assert!(InvocationOptions::new().to_map().is_empty());
    }

    #[test]
    fn map_uses_wire_field_names() {
        let options = InvocationOptions::new()
            .with_query(json!({ "name": "a" }))
            .with_content_type("json")
            .with_body(json!({ "name": "b" }));
        let map = options.to_map();
        assert_eq!(map["query"], json!({ "name": "a" }));
        assert_eq!(map["contentType"], json!("json"));
        assert_eq!(map["body"], json!({ "name": "b" }));
        assert!(!map.contains_key("headers"));
    }

    #[test]
    fn with_header_builds_object() {
        let options = InvocationOptions::new()
            .with_header("authorization", "Bearer secret")
            .with_header("x-trace", "1");
        assert_eq!(
            options.headers,
            Some(json!({ "authorization": "Bearer secret", "x-trace": "1" }))
        );
    }

    #[test]
    fn with_header_replaces_non_object_headers() {
        let options = InvocationOptions::new()
            .with_headers(json!("garbage"))
            .with_header("a", "b");
        assert_eq!(options.headers, Some(json!({ "a": "b" })));
    }

    #[test]
    fn from_value_reads_camel_case_and_ignores_unknown_fields() {
        let options = InvocationOptions::from_value(json!({
            "contentType": "json",
            "body": { "name": "x" },
            "extra": 1
        }))
        .unwrap();
        assert_eq!(options.content_type.as_deref(), Some("json"));
        assert_eq!(options.body, Some(json!({ "name": "x" })));
        assert!(options.query.is_none());
    }

    #[test]
    fn from_value_rejects_non_string_content_type() {
        let err = InvocationOptions::from_value(json!({ "contentType": 5 })).unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest(_)));
    }
}
