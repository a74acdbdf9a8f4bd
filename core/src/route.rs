//! Typed route maps.
//!
//! # Design
//! A route map is a set of `Operation` types, one per legal (route, method)
//! pair. Each carries the inputs it declares and names the types its
//! success and failure bodies decode into, so `ApiClient::call` can only be
//! given pairs the map defines. The untyped `invoke`/`raw` entry points skip
//! this layer and accept any route and method strings.

use std::borrow::Cow;

use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::http::HttpMethod;
use crate::options::InvocationOptions;

pub trait Operation {
    /// Body type of a 2xx response.
    type Ok: DeserializeOwned;
    /// Body type of any other response.
    type Err: DeserializeOwned;

    /// Path relative to the client's base URL, without a leading `/`.
    fn route(&self) -> Cow<'_, str>;

    fn method(&self) -> HttpMethod;

    /// Query, headers, content type, and body declared by this operation.
    fn options(&self) -> Result<InvocationOptions>;
}
