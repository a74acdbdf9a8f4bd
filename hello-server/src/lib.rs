//! The hello service: greets a person named by query, route, or JSON body,
//! with a bearer-protected variant under `/secure`.
//!
//! Every response, including failures, is a `GeneralMessage` served as
//! `application/json; charset=utf-8`.

pub mod auth;
pub mod config;

use std::any::Any;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query,
    },
    http::{header, HeaderValue, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};
use tracing::{debug, error};

pub use auth::AuthState;
pub use config::{ConfigError, ServerConfig};

const JSON_UTF8: &str = "application/json; charset=utf-8";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
}

impl Person {
    /// A name must be at least one character long.
    pub fn is_valid(&self) -> bool {
        !self.name.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralMessage {
    pub message: String,
}

/// A `GeneralMessage` with a status code.
#[derive(Debug)]
pub struct MessageResponse {
    status: StatusCode,
    message: GeneralMessage,
}

impl MessageResponse {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: GeneralMessage {
                message: message.into(),
            },
        }
    }

    fn greet(person: &Person) -> Self {
        Self::new(StatusCode::OK, format!("hello {}", person.name))
    }
}

impl IntoResponse for MessageResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, HeaderValue::from_static(JSON_UTF8))],
            Json(self.message),
        )
            .into_response()
    }
}

pub fn app(config: &ServerConfig) -> Router {
    let secure = Router::new()
        .route("/secure/hello", get(hello_query))
        .route_layer(middleware::from_fn_with_state(
            AuthState::new(&config.auth_token),
            auth::require_bearer,
        ));

    Router::new()
        .route("/hello", get(hello_query).post(hello_body))
        .route("/hello/{name}", get(hello_route))
        .merge(secure)
        .layer(CatchPanicLayer::custom(unexpected_error))
        .layer(TraceLayer::new_for_http())
}

pub async fn run(listener: TcpListener, config: ServerConfig) -> Result<(), std::io::Error> {
    axum::serve(listener, app(&config)).await
}

async fn hello_query(query: Result<Query<Person>, QueryRejection>) -> MessageResponse {
    match query {
        Ok(Query(person)) if person.is_valid() => MessageResponse::greet(&person),
        other => {
            debug!(rejection = ?other.err(), "invalid hello query");
            MessageResponse::new(StatusCode::BAD_REQUEST, "missing query .name")
        }
    }
}

async fn hello_route(path: Result<Path<Person>, PathRejection>) -> MessageResponse {
    match path {
        Ok(Path(person)) if person.is_valid() => MessageResponse::greet(&person),
        other => {
            debug!(rejection = ?other.err(), "invalid hello route");
            MessageResponse::new(StatusCode::BAD_REQUEST, "missing route .name")
        }
    }
}

async fn hello_body(body: Result<Json<Person>, JsonRejection>) -> MessageResponse {
    match body {
        Ok(Json(person)) if person.is_valid() => MessageResponse::greet(&person),
        other => {
            debug!(rejection = ?other.err(), "invalid hello body");
            MessageResponse::new(StatusCode::BAD_REQUEST, "missing body .name")
        }
    }
}

fn unexpected_error(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!(%detail, "unexpected error");
    MessageResponse::new(StatusCode::INTERNAL_SERVER_ERROR, "unexpected error").into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn general_message_serializes_to_json() {
        let message = GeneralMessage {
            message: "hello there".to_string(),
        };
        let json = serde_json::to_string(&message).unwrap();
        assert_eq!(json, r#"{"message":"hello there"}"#);
    }

    #[test]
    fn person_requires_name_field() {
        let result: Result<Person, _> = serde_json::from_str(r#"{"nom":"x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn person_rejects_non_string_name() {
        let result: Result<Person, _> = serde_json::from_str(r#"{"name":5}"#);
        assert!(result.is_err());
    }

    #[test]
    fn empty_name_is_invalid() {
        let person: Person = serde_json::from_str(r#"{"name":""}"#).unwrap();
        assert!(!person.is_valid());
        assert!(Person {
            name: "a".to_string()
        }
        .is_valid());
    }

    #[test]
    fn message_response_sets_charset() {
        let response = MessageResponse::new(StatusCode::BAD_REQUEST, "nope").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.headers()[header::CONTENT_TYPE], JSON_UTF8);
    }

    #[test]
    fn panic_maps_to_500() {
        let response = unexpected_error(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
