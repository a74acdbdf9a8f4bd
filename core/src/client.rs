//! Request building, dispatch, and response decoding.
//!
//! # Design
//! `ApiClient` holds a base URL, an immutable serializer registry, and a
//! transport. Like the rest of the crate it splits each call in two: a pure
//! `build_*` step that produces an `HttpRequest`, and a pure `decode` step
//! that turns an `HttpResponse` into an `ApiResult`. `raw` and `invoke` glue
//! those to the transport. Any serializer lookup for the request body
//! happens in the build step, so a missing serializer fails before I/O.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

use crate::content_type::{get_content_type, request_content_type};
use crate::error::{ApiError, Result};
use crate::fields::{has_non_null_object_field, has_non_null_string_field};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::options::InvocationOptions;
use crate::query::{create_query_string, encodable_text};
use crate::result::{ApiResult, Outcome};
use crate::route::Operation;
use crate::serializer::Serializers;
use crate::transport::{ReqwestTransport, RequestInit, Transport};

const DEFAULT_CONTENT_TYPE: &str = "json";

/// Generic client for a route map.
pub struct ApiClient<T = ReqwestTransport> {
    base_url: String,
    serializers: Arc<Serializers>,
    transport: Arc<T>,
}

impl ApiClient<ReqwestTransport> {
    /// Client using a fresh `reqwest` transport.
    pub fn new(base_url: &str, serializers: Serializers) -> Self {
        Self::with_transport(base_url, serializers, ReqwestTransport::new())
    }
}

impl<T> ApiClient<T> {
    pub fn with_transport(base_url: &str, serializers: Serializers, transport: T) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            serializers: Arc::new(serializers),
            transport: Arc::new(transport),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn serializers(&self) -> &Serializers {
        &self.serializers
    }

    /// Build the request `raw` would send.
    ///
    /// The `content-type` header is set only when the options declare a
    /// content type.
    pub fn build_raw(
        &self,
        route: &str,
        method: impl Into<HttpMethod>,
        options: &InvocationOptions,
    ) -> Result<HttpRequest> {
        self.build(route, method.into(), options, None)
    }

    /// Build the request `invoke` would send.
    ///
    /// Same as [`ApiClient::build_raw`], except that the `content-type`
    /// header is always present and defaults to `application/json`.
    pub fn build_invoke(
        &self,
        route: &str,
        method: impl Into<HttpMethod>,
        options: &InvocationOptions,
    ) -> Result<HttpRequest> {
        self.build(route, method.into(), options, Some(DEFAULT_CONTENT_TYPE))
    }

    fn build(
        &self,
        route: &str,
        method: HttpMethod,
        options: &InvocationOptions,
        fallback_content_type: Option<&str>,
    ) -> Result<HttpRequest> {
        let options = options.to_map();
        let options = Some(&options);

        let mut url = format!("{}/{route}", self.base_url);
        if has_non_null_object_field("query", options) {
            url.push_str(&create_query_string(options.and_then(|o| o.get("query"))));
        }

        let mut headers = Vec::new();
        if has_non_null_object_field("headers", options) {
            if let Some(Value::Object(declared)) = options.and_then(|o| o.get("headers")) {
                headers.extend(header_pairs(declared));
            }
        }

        let content_type = if has_non_null_string_field("contentType", options) {
            options.and_then(|o| o.get("contentType")).and_then(Value::as_str)
        } else {
            None
        };
        if let Some(token) = content_type.or(fallback_content_type) {
            set_header(&mut headers, "content-type", request_content_type(token));
        }

        let body = match (content_type, options.and_then(|o| o.get("body"))) {
            (Some(token), Some(body)) if has_non_null_object_field("body", options) => {
                Some(self.serializers.encode(token, body)?)
            }
            _ => None,
        };

        Ok(HttpRequest {
            method,
            url,
            headers,
            body,
        })
    }

    /// Decode a response body by its `content-type` header (default
    /// `json`) and file it under `Ok` for 2xx statuses, `Err` otherwise.
    pub fn decode<O, E>(&self, response: HttpResponse) -> Result<ApiResult<O, E>>
    where
        O: DeserializeOwned,
        E: DeserializeOwned,
    {
        let header = response
            .header("content-type")
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_CONTENT_TYPE);
        let token = get_content_type(header);
        let decoded = self.serializers.decode(token, &response)?;

        let outcome = if response.is_success() {
            Outcome::Ok(from_decoded(decoded)?)
        } else {
            Outcome::Err(from_decoded(decoded)?)
        };
        Ok(ApiResult { outcome, response })
    }
}

impl<T: Transport> ApiClient<T> {
    /// Send a request and return the response without decoding it.
    pub async fn raw(
        &self,
        route: &str,
        method: impl Into<HttpMethod>,
        options: &InvocationOptions,
        init: &RequestInit,
    ) -> Result<HttpResponse> {
        let request = self.build_raw(route, method, options)?;
        self.send(request, init).await
    }

    /// Send a request and decode the response into an `ApiResult`.
    ///
    /// A non-2xx status is not an error; its decoded body is the `Err`
    /// outcome.
    pub async fn invoke(
        &self,
        route: &str,
        method: impl Into<HttpMethod>,
        options: &InvocationOptions,
        init: &RequestInit,
    ) -> Result<ApiResult<Value, Value>> {
        let request = self.build_invoke(route, method, options)?;
        let response = self.send(request, init).await?;
        self.decode(response)
    }

    /// Typed `invoke` for an operation from a route map.
    pub async fn call<Op: Operation>(
        &self,
        operation: &Op,
        init: &RequestInit,
    ) -> Result<ApiResult<Op::Ok, Op::Err>> {
        let options = operation.options()?;
        let request = self.build_invoke(&operation.route(), operation.method(), &options)?;
        let response = self.send(request, init).await?;
        self.decode(response)
    }

    /// Typed `raw` for an operation from a route map.
    pub async fn call_raw<Op: Operation>(
        &self,
        operation: &Op,
        init: &RequestInit,
    ) -> Result<HttpResponse> {
        let options = operation.options()?;
        self.raw(&operation.route(), operation.method(), &options, init)
            .await
    }

    async fn send(&self, request: HttpRequest, init: &RequestInit) -> Result<HttpResponse> {
        let method = request.method.clone();
        let url = request.url.clone();
        debug!(%method, %url, "dispatching request");

        let response = init.drive(self.transport.send(request)).await?;
        debug!(%method, %url, status = response.status, "received response");
        Ok(response)
    }
}

impl<T> Clone for ApiClient<T> {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            serializers: Arc::clone(&self.serializers),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T> fmt::Debug for ApiClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("serializers", &self.serializers)
            .finish_non_exhaustive()
    }
}

/// Scalar header values as strings; anything else is skipped.
fn header_pairs(declared: &Map<String, Value>) -> impl Iterator<Item = (String, String)> + '_ {
    declared
        .iter()
        .filter_map(|(name, value)| encodable_text(value).map(|text| (name.clone(), text)))
}

/// Replace any header named `name` (case-insensitively) with `value`.
fn set_header(headers: &mut Vec<(String, String)>, name: &str, value: String) {
    headers.retain(|(key, _)| !key.eq_ignore_ascii_case(name));
    headers.push((name.to_string(), value));
}

fn from_decoded<V: DeserializeOwned>(decoded: Value) -> Result<V> {
    serde_json::from_value(decoded).map_err(|e| ApiError::Deserialization(e.to_string()))
}
