//! Typed HTTP API client core.
//!
//! # Overview
//! `ApiClient` turns a route, a method, and an options bag into an HTTP
//! request, sends it through a pluggable `Transport`, and decodes the
//! response with a serializer picked from its `content-type`. Route maps
//! (`Operation` implementations) put types on top of that; `hello` is the
//! route map for the demo hello service.
//!
//! # Design
//! - Request building and response decoding are pure (`build_*`, `decode`);
//!   only `raw`/`invoke`/`call` perform I/O.
//! - Non-2xx responses are decoded into `Outcome::Err`, not returned as
//!   errors. `ApiError` covers client-side and transport failures only.
//! - The serializer registry is immutable once the client is built.

pub mod client;
pub mod content_type;
pub mod error;
pub mod fields;
pub mod hello;
pub mod http;
pub mod options;
pub mod query;
pub mod result;
pub mod route;
pub mod serializer;
pub mod transport;

pub use client::ApiClient;
pub use content_type::get_content_type;
pub use error::{ApiError, Result};
pub use fields::{has_non_null_object_field, has_non_null_string_field};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use options::InvocationOptions;
pub use query::{create_query_string, value_is_encodable};
pub use result::{ApiResult, Outcome};
pub use route::Operation;
pub use serializer::{JsonSerializer, Serializer, Serializers};
pub use transport::{ReqwestTransport, RequestInit, Transport};
