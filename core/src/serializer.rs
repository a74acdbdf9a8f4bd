//! Pluggable body codecs keyed by content-type token.
//!
//! # Design
//! A `Serializers` registry is built once and handed to `ApiClient`, which
//! keeps it behind an `Arc` and never mutates it. Lookups for an
//! unregistered token fail with `ApiError::MissingSerializer` instead of
//! falling back to a default codec.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::{ApiError, Result};
use crate::http::HttpResponse;

/// Encodes request bodies and decodes response bodies for one content type.
pub trait Serializer: Send + Sync {
    fn encode(&self, body: &Value) -> Result<Vec<u8>>;
    fn decode(&self, response: &HttpResponse) -> Result<Value>;
}

/// JSON codec registered under `"json"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSerializer;

impl Serializer for JsonSerializer {
    fn encode(&self, body: &Value) -> Result<Vec<u8>> {
        serde_json::to_vec(body).map_err(|e| ApiError::Serialization(e.to_string()))
    }

    fn decode(&self, response: &HttpResponse) -> Result<Value> {
        if response.body.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }
}

/// Registry of serializers by content-type token.
#[derive(Clone, Default)]
pub struct Serializers {
    by_token: HashMap<String, Arc<dyn Serializer>>,
}

impl Serializers {
    /// An empty registry. Every lookup fails until serializers are added.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding only [`JsonSerializer`] under `"json"`.
    pub fn json() -> Self {
        Self::new().with("json", JsonSerializer)
    }

    /// Register `serializer` under `token`, replacing any previous entry.
    pub fn with(mut self, token: impl Into<String>, serializer: impl Serializer + 'static) -> Self {
        self.by_token.insert(token.into(), Arc::new(serializer));
        self
    }

    pub fn contains(&self, token: &str) -> bool {
        self.by_token.contains_key(token)
    }

    /// Registered tokens, sorted.
    pub fn tokens(&self) -> Vec<&str> {
        let mut tokens: Vec<&str> = self.by_token.keys().map(String::as_str).collect();
        tokens.sort_unstable();
        tokens
    }

    pub fn get(&self, token: &str) -> Result<&dyn Serializer> {
        self.by_token
            .get(token)
            .map(|serializer| serializer.as_ref())
            .ok_or_else(|| ApiError::MissingSerializer {
                content_type: token.to_string(),
            })
    }

    pub fn encode(&self, token: &str, body: &Value) -> Result<Vec<u8>> {
        self.get(token)?.encode(body)
    }

    pub fn decode(&self, token: &str, response: &HttpResponse) -> Result<Value> {
        self.get(token)?.decode(response)
    }
}

impl fmt::Debug for Serializers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Serializers")
            .field("tokens", &self.tokens())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(body: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: body.as_bytes().to_vec(),
        }
    }

    struct Shouting;

    impl Serializer for Shouting {
        fn encode(&self, body: &Value) -> Result<Vec<u8>> {
            Ok(body.to_string().to_uppercase().into_bytes())
        }

        fn decode(&self, response: &HttpResponse) -> Result<Value> {
            Ok(Value::String(response.text().to_lowercase()))
        }
    }

    #[test]
    fn json_registry_round_trips_body() {
        let serializers = Serializers::json();
        let bytes = serializers.encode("json", &json!({ "name": "abc" })).unwrap();
        assert_eq!(bytes, br#"{"name":"abc"}"#);
        let value = serializers.decode("json", &response(r#"{"message":"hi"}"#)).unwrap();
        assert_eq!(value, json!({ "message": "hi" }));
    }

    #[test]
    fn empty_json_body_decodes_to_null() {
        let value = JsonSerializer.decode(&response("")).unwrap();
        assert_eq!(value, Value::Null);
    }

    #[test]
    fn bad_json_is_a_deserialization_error() {
        let err = JsonSerializer.decode(&response("not json")).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn missing_token_names_the_content_type() {
        let serializers = Serializers::json();
        let err = serializers.encode("xml", &json!({})).unwrap_err();
        match err {
            ApiError::MissingSerializer { content_type } => assert_eq!(content_type, "xml"),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(
            serializers.decode("xml", &response("")).unwrap_err().to_string(),
            "missing xml serializer"
        );
    }

    #[test]
    fn custom_serializers_are_looked_up_by_token() {
        let serializers = Serializers::json().with("shout", Shouting);
        assert_eq!(serializers.tokens(), vec!["json", "shout"]);
        assert!(serializers.contains("shout"));
        let bytes = serializers.encode("shout", &json!("abc")).unwrap();
        assert_eq!(bytes, br#""ABC""#);
        let value = serializers.decode("shout", &response("LOUD")).unwrap();
        assert_eq!(value, json!("loud"));
    }

    #[test]
    fn empty_registry_has_no_tokens() {
        let serializers = Serializers::new();
        assert!(serializers.tokens().is_empty());
        assert!(serializers.get("json").is_err());
    }
}
