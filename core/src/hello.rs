//! Route map for the hello service.
//!
//! # Design
//! `Person` and `GeneralMessage` mirror the server's schema but are defined
//! independently; the integration tests catch any drift between the two.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::Result;
use crate::http::HttpMethod;
use crate::options::{to_option_value, InvocationOptions};
use crate::route::Operation;
use crate::serializer::Serializers;

/// A named person. The server rejects an empty name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
}

impl Person {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Body of every hello response, successful or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralMessage {
    pub message: String,
}

/// `GET /hello?name=`
#[derive(Debug, Clone)]
pub struct GetHello {
    pub query: Person,
}

impl Operation for GetHello {
    type Ok = GeneralMessage;
    type Err = GeneralMessage;

    fn route(&self) -> Cow<'_, str> {
        Cow::Borrowed("hello")
    }

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn options(&self) -> Result<InvocationOptions> {
        Ok(InvocationOptions::new().with_query(to_option_value(&self.query)?))
    }
}

/// `POST /hello` with a JSON `Person` body.
#[derive(Debug, Clone)]
pub struct PostHello {
    pub body: Person,
}

impl Operation for PostHello {
    type Ok = GeneralMessage;
    type Err = GeneralMessage;

    fn route(&self) -> Cow<'_, str> {
        Cow::Borrowed("hello")
    }

    fn method(&self) -> HttpMethod {
        HttpMethod::Post
    }

    fn options(&self) -> Result<InvocationOptions> {
        Ok(InvocationOptions::new()
            .with_content_type("json")
            .with_body(to_option_value(&self.body)?))
    }
}

/// `GET /hello/{name}`
#[derive(Debug, Clone)]
pub struct GetHelloByName {
    pub name: String,
}

impl Operation for GetHelloByName {
    type Ok = GeneralMessage;
    type Err = GeneralMessage;

    fn route(&self) -> Cow<'_, str> {
        Cow::Owned(format!("hello/{}", self.name))
    }

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn options(&self) -> Result<InvocationOptions> {
        Ok(InvocationOptions::new())
    }
}

/// `GET /secure/hello?name=`, authorized with `Bearer <token>`.
#[derive(Debug, Clone)]
pub struct GetSecureHello {
    pub query: Person,
    pub token: String,
}

impl Operation for GetSecureHello {
    type Ok = GeneralMessage;
    type Err = GeneralMessage;

    fn route(&self) -> Cow<'_, str> {
        Cow::Borrowed("secure/hello")
    }

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn options(&self) -> Result<InvocationOptions> {
        Ok(InvocationOptions::new()
            .with_header("authorization", format!("Bearer {}", self.token))
            .with_query(to_option_value(&self.query)?))
    }
}

/// A client for the hello service with the JSON serializer registered.
pub fn create_client(base_url: &str) -> ApiClient {
    ApiClient::new(base_url, Serializers::json())
}
